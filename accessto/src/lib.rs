pub mod app;
pub mod io;
