pub use self::{board::*, piece::*, position::*, shape::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod position;
pub(crate) mod shape;
