mod label;

pub use label::Label;
