pub mod adjustment;
pub mod interline;
pub mod linebreak;
pub mod pagination;
