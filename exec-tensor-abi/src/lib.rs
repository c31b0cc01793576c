//! The element-type and numeric ABI shared by every executor backend.
//!
//! Every backend crate (`exec-backend-cpu`, `exec-backend-accel`,
//! `exec-backend-controlflow`) stores operand data as raw bytes tagged with an
//! [`ElementType`]; this crate is the one place that knows how to size and
//! display those tags so no two backends can disagree about byte layout.

mod element;
mod error;

pub use element::ElementType;
pub use error::Error;
