pub mod all;
pub mod ev;
pub mod fd;
pub mod ix;
pub mod lq;
pub mod st;
