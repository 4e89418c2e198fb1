pub mod answer;
pub mod question;
pub mod session;
pub mod subject;
pub mod variant;
