pub mod html;
pub mod path;
pub mod sanitize;
pub mod string;
