pub mod chain;
pub mod store;
pub mod user;
pub mod venue;

pub use chain::Entity as ChainEntity;
pub use store::Entity as StoreEntity;
pub use user::Entity as UserEntity;
pub use venue::Entity as VenueEntity;
