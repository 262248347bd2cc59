pub mod profile;
pub mod scene;
pub mod series;
pub mod skill;
pub mod transaction;
