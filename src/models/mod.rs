pub mod family;
pub mod incident;
pub mod presence;
