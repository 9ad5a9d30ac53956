pub mod comments;
pub mod convert;
pub mod editor;
