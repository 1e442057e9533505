//! Audio input: decoding a recording and cutting it into chunk segments.

pub mod source;
pub mod wav;

pub use source::AudioSource;
pub use wav::WavAudioSource;
