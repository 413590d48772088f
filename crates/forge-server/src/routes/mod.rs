pub mod deploy;
pub mod health;
pub mod jobs;
