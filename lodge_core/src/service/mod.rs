pub mod calendar;
pub mod contact;
pub mod education;
pub mod history;
pub mod members;
pub mod publications;
pub mod search;
pub mod site;
pub mod statistics;
