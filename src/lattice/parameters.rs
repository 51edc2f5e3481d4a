pub mod d2q9;
