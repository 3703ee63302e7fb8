pub mod diagnosis;
pub mod flag;
pub mod health;
pub mod server;
pub mod ui;
