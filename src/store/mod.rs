pub mod families;
pub mod incidents;
pub mod presence;
