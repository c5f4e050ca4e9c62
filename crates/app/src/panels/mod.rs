pub mod audio;
pub mod constellation;
pub mod journal;
pub mod somatic;
