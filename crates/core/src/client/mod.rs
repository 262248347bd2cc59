pub mod graphql;
pub mod queries;
pub mod transport;
