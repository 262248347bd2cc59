pub mod client;
pub mod errors;
pub mod models;
pub mod services;

use client::graphql::GraphqlClient;
use client::queries::{self, DashboardData};
use client::transport::{GraphqlTransport, HttpTransport};
use errors::CoreError;
use models::scene::Chart;
use models::series::{AuditBalance, CumulativePoint, MonthBucket, PassFailCounts};
use models::skill::{DomainScore, SkillRecord};
use services::aggregation_service::AggregationService;
use services::chart_service::{
    BarChartLayout, ChartService, DonutLayout, LineChartLayout, RadarAxis, RadarLayout,
    RingLayout,
};
use services::skill_service::SkillService;

/// Main entry point for the student-dashboard core library.
///
/// Owns the query client (and with it the single bearer-token slot)
/// plus the stateless aggregation, skill and chart services. The
/// presentation layer calls `sign_in`, then `load_overview`, then the
/// pure view-model builders — the core never touches any ambient
/// storage or screen element.
#[must_use]
pub struct StudentDashboard {
    client: GraphqlClient,
    aggregation: AggregationService,
    skills: SkillService,
    charts: ChartService,
}

impl std::fmt::Debug for StudentDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudentDashboard")
            .field("signed_in", &self.client.is_authenticated())
            .finish()
    }
}

impl StudentDashboard {
    /// Build a dashboard against the platform's HTTPS endpoints.
    pub fn new(signin_url: impl Into<String>, graphql_url: impl Into<String>) -> Self {
        Self::with_transport(Box::new(HttpTransport::new(signin_url, graphql_url)))
    }

    /// Build a dashboard over any transport (used by tests to inject a
    /// mock, and by embedders with their own HTTP stack).
    pub fn with_transport(transport: Box<dyn GraphqlTransport>) -> Self {
        Self {
            client: GraphqlClient::new(transport),
            aggregation: AggregationService::new(),
            skills: SkillService::new(),
            charts: ChartService::new(),
        }
    }

    // ── Session ─────────────────────────────────────────────────────

    /// Exchange basic credentials for a bearer token.
    pub async fn sign_in(&mut self, username: &str, password: &str) -> Result<(), CoreError> {
        self.client.sign_in(username, password).await
    }

    /// Drop the held token.
    pub fn sign_out(&mut self) {
        self.client.sign_out();
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.client.is_authenticated()
    }

    /// Direct access to the query client for custom queries.
    #[must_use]
    pub fn client(&self) -> &GraphqlClient {
        &self.client
    }

    // ── Data loading ────────────────────────────────────────────────

    /// Fetch everything one dashboard render needs: the profile query
    /// first (to resolve the user id), then the row queries
    /// concurrently. Any single failure aborts the whole load.
    pub async fn load_overview(&self) -> Result<DashboardData, CoreError> {
        queries::load_overview(&self.client).await
    }

    // ── Aggregated series ───────────────────────────────────────────

    #[must_use]
    pub fn xp_by_month(&self, data: &DashboardData) -> Vec<MonthBucket> {
        self.aggregation.xp_by_month(&data.xp)
    }

    #[must_use]
    pub fn cumulative_xp(&self, data: &DashboardData) -> Vec<CumulativePoint> {
        self.aggregation.cumulative_over_time(&data.xp)
    }

    #[must_use]
    pub fn total_xp(&self, data: &DashboardData) -> i64 {
        self.aggregation.total_xp(&data.xp)
    }

    #[must_use]
    pub fn pass_fail_counts(&self, data: &DashboardData) -> PassFailCounts {
        self.aggregation.pass_fail_counts(&data.results)
    }

    #[must_use]
    pub fn audit_balance(&self, data: &DashboardData) -> AuditBalance {
        self.aggregation.audit_balance(&data.audits)
    }

    #[must_use]
    pub fn skills(&self, data: &DashboardData) -> Vec<SkillRecord> {
        self.skills.classify(&data.xp, &data.results)
    }

    #[must_use]
    pub fn domain_scores(&self, data: &DashboardData) -> Vec<DomainScore> {
        self.skills.domain_scores(&data.results)
    }

    // ── Chart scenes ────────────────────────────────────────────────

    /// XP per month as a bar/line composite scene.
    #[must_use]
    pub fn xp_month_chart(&self, data: &DashboardData) -> Chart {
        self.charts
            .xp_month_chart(&self.xp_by_month(data), &BarChartLayout::default())
    }

    /// Cumulative XP over time as a line/area scene.
    #[must_use]
    pub fn cumulative_xp_chart(&self, data: &DashboardData) -> Chart {
        self.charts
            .cumulative_xp_chart(&self.cumulative_xp(data), &LineChartLayout::default())
    }

    /// Passed vs. failed projects as a donut scene.
    #[must_use]
    pub fn pass_fail_donut(&self, data: &DashboardData) -> Chart {
        let counts = self.pass_fail_counts(data);
        self.charts.donut_chart(
            counts.pass as f64,
            counts.fail as f64,
            "Success rate",
            &DonutLayout::default(),
        )
    }

    /// Audit points given vs. received as a donut scene.
    #[must_use]
    pub fn audit_donut(&self, data: &DashboardData) -> Chart {
        let balance = self.audit_balance(data);
        self.charts.donut_chart(
            balance.total_up as f64,
            balance.total_down as f64,
            "Audit ratio",
            &DonutLayout {
                width: 300.0,
                height: 300.0,
            },
        )
    }

    /// Progress toward the next level as a ring scene.
    #[must_use]
    pub fn level_ring(&self, data: &DashboardData) -> Chart {
        self.charts
            .level_ring(self.total_xp(data), &RingLayout::default())
    }

    /// Curriculum-domain completion as a radar scene.
    #[must_use]
    pub fn skills_radar(&self, data: &DashboardData) -> Chart {
        let axes: Vec<RadarAxis> = self
            .domain_scores(data)
            .into_iter()
            .map(|d| RadarAxis::new(d.name, d.score))
            .collect();
        self.charts.radar_chart(&axes, 1.0, &RadarLayout::default())
    }
}
