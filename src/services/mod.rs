pub mod backend_probe;
