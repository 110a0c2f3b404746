pub mod tomato;
