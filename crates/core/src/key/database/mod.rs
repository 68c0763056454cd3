pub mod tb;
