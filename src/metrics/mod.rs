pub mod confusion;
pub mod rocauc;
