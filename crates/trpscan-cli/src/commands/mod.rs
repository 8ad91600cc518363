pub mod annotations;
pub mod file;
pub mod scan;
