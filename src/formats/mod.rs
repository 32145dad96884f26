pub mod anims;
pub mod container;
pub mod legacy;
pub mod level;
pub mod tileset;
