pub mod domain;
pub mod funding;
pub mod investor;
pub mod matches;
pub mod startup;

pub use domain::Entity as Domain;
pub use funding::Entity as Funding;
pub use investor::Entity as Investor;
pub use matches::Entity as Match;
pub use startup::Entity as Startup;
