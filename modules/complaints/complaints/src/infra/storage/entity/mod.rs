pub mod complaint;
pub mod complaint_sequence;
pub mod facility;
pub mod filter;
pub mod manager;
pub mod resident;
pub mod room;
pub mod washroom;
