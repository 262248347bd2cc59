use serde::Deserialize;
use serde_json::json;

use crate::client::graphql::GraphqlClient;
use crate::errors::CoreError;
use crate::models::profile::UserProfile;
use crate::models::transaction::{ResultRecord, Transaction};

/// The signed-in user's profile, including audit totals.
pub const USER_PROFILE_QUERY: &str = "\
query {
  user {
    id
    login
    firstName
    lastName
    totalUp
    totalDown
    auditRatio
  }
}";

/// All XP transactions for one user, oldest first.
pub const XP_TRANSACTIONS_QUERY: &str = "\
query ($userId: Int!) {
  transaction(
    where: { userId: { _eq: $userId }, type: { _eq: \"xp\" } }
    order_by: { createdAt: asc }
  ) {
    id
    type
    amount
    createdAt
    path
  }
}";

/// All project results (pass/fail grades) for one user.
pub const RESULTS_QUERY: &str = "\
query ($userId: Int!) {
  result(where: { userId: { _eq: $userId } }) {
    id
    grade
    path
    createdAt
  }
}";

/// All audit-vote transactions (points given and received) for one user.
pub const AUDIT_TRANSACTIONS_QUERY: &str = "\
query ($userId: Int!) {
  transaction(
    where: { userId: { _eq: $userId }, type: { _in: [\"up\", \"down\"] } }
  ) {
    id
    type
    amount
    createdAt
    path
  }
}";

#[derive(Deserialize)]
struct UserRows {
    user: Vec<UserProfile>,
}

#[derive(Deserialize)]
struct TransactionRows {
    transaction: Vec<Transaction>,
}

#[derive(Deserialize)]
struct ResultRows {
    result: Vec<ResultRecord>,
}

/// Everything one dashboard render needs, fetched in a single load.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub profile: UserProfile,
    pub xp: Vec<Transaction>,
    pub results: Vec<ResultRecord>,
    pub audits: Vec<Transaction>,
}

/// Fetch the signed-in user's profile row.
pub async fn fetch_profile(client: &GraphqlClient) -> Result<UserProfile, CoreError> {
    let data = client.execute(USER_PROFILE_QUERY, json!({})).await?;
    let rows: UserRows = serde_json::from_value(data)?;
    rows.user
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::Query("user query returned no rows".into()))
}

/// Fetch all XP transactions for a user, oldest first.
pub async fn fetch_xp_transactions(
    client: &GraphqlClient,
    user_id: i64,
) -> Result<Vec<Transaction>, CoreError> {
    let data = client
        .execute(XP_TRANSACTIONS_QUERY, json!({ "userId": user_id }))
        .await?;
    let rows: TransactionRows = serde_json::from_value(data)?;
    Ok(rows.transaction)
}

/// Fetch all project results for a user.
pub async fn fetch_results(
    client: &GraphqlClient,
    user_id: i64,
) -> Result<Vec<ResultRecord>, CoreError> {
    let data = client
        .execute(RESULTS_QUERY, json!({ "userId": user_id }))
        .await?;
    let rows: ResultRows = serde_json::from_value(data)?;
    Ok(rows.result)
}

/// Fetch all audit-vote transactions for a user.
pub async fn fetch_audit_transactions(
    client: &GraphqlClient,
    user_id: i64,
) -> Result<Vec<Transaction>, CoreError> {
    let data = client
        .execute(AUDIT_TRANSACTIONS_QUERY, json!({ "userId": user_id }))
        .await?;
    let rows: TransactionRows = serde_json::from_value(data)?;
    Ok(rows.transaction)
}

/// Load everything a dashboard render needs: resolve the user via the
/// profile query, then fan out the three row queries concurrently.
///
/// Any single failure aborts the whole load — there is no
/// partial-render path.
pub async fn load_overview(client: &GraphqlClient) -> Result<DashboardData, CoreError> {
    let profile = fetch_profile(client).await?;
    let user_id = profile.id;

    let (xp, results, audits) = futures_util::try_join!(
        fetch_xp_transactions(client, user_id),
        fetch_results(client, user_id),
        fetch_audit_transactions(client, user_id),
    )?;

    tracing::debug!(
        xp_rows = xp.len(),
        result_rows = results.len(),
        audit_rows = audits.len(),
        "dashboard overview loaded"
    );

    Ok(DashboardData {
        profile,
        xp,
        results,
        audits,
    })
}
