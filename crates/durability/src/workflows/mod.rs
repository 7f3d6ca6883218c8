pub mod catalog;
pub mod sustainability;
