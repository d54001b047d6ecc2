pub mod chunk;
pub mod commit;
pub mod window;
