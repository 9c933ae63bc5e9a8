mod reminder;

pub mod dtos {
    pub use crate::reminder::dtos::*;
}
