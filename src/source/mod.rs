//! Frame sources
//!
//! Anything that can hand the decoder a freshly captured frame. Transport failures stay here and
//! never reach the decoder.

pub mod error;
pub mod max31855;

pub use self::{error::Error, max31855::Max31855};
use crate::frame::Frame;

pub trait FrameSource {
    type Error;

    /// Capture one frame from the converter
    fn read_frame(&mut self) -> Result<Frame, Self::Error>;
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    type Error = S::Error;

    fn read_frame(&mut self) -> Result<Frame, Self::Error> {
        (**self).read_frame()
    }
}

/// Fake frame source for testing
#[cfg(any(test, feature = "fake"))]
pub mod fake {
    use heapless::Deque;

    use crate::{frame::Frame, source::FrameSource};

    /// Every queued frame has been handed out
    #[derive(Debug, Copy, Clone, Eq, PartialEq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct Exhausted;

    /// A fake source that replays a queue of frames, oldest first
    pub struct FakeSource<const N: usize> {
        frames: Deque<Frame, N>,
    }

    impl<const N: usize> FakeSource<N> {
        pub const fn new() -> Self {
            Self {
                frames: Deque::new(),
            }
        }

        /// Queue a frame. Gives it back if the queue is full.
        pub fn push(&mut self, frame: impl Into<Frame>) -> Result<(), Frame> {
            self.frames.push_back(frame.into())
        }

        /// Number of frames still queued
        pub fn remaining(&self) -> usize {
            self.frames.len()
        }
    }

    impl<const N: usize> Default for FakeSource<N> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<F: Into<Frame>, const N: usize> FromIterator<F> for FakeSource<N> {
        /// Frames beyond the capacity are dropped
        fn from_iter<T: IntoIterator<Item = F>>(iter: T) -> Self {
            let mut source = Self::new();
            for frame in iter {
                if source.push(frame).is_err() {
                    break;
                }
            }
            source
        }
    }

    impl<const N: usize> FrameSource for FakeSource<N> {
        type Error = Exhausted;

        fn read_frame(&mut self) -> Result<Frame, Self::Error> {
            self.frames.pop_front().ok_or(Exhausted)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn replays_in_order() {
            let mut source: FakeSource<4> = [
                Frame([0x00, 0x50, 0x02, 0x00]),
                Frame([0x80, 0x00, 0x81, 0x00]),
            ]
            .into_iter()
            .collect();

            assert_eq!(source.remaining(), 2);
            assert_eq!(source.read_frame(), Ok(Frame([0x00, 0x50, 0x02, 0x00])));
            assert_eq!(source.read_frame(), Ok(Frame([0x80, 0x00, 0x81, 0x00])));
            assert_eq!(source.read_frame(), Err(Exhausted));
        }

        #[test]
        fn full_queue_rejects() {
            let mut source = FakeSource::<1>::new();
            assert_eq!(source.push(0x0000_0001_u32), Ok(()));
            assert_eq!(source.push(0x0000_0002_u32), Err(Frame::from(0x0000_0002_u32)));
            assert_eq!(source.remaining(), 1);
        }

        #[test]
        fn borrowed_source() {
            fn read<S: FrameSource>(mut source: S) -> Result<Frame, S::Error> {
                source.read_frame()
            }

            let mut source = FakeSource::<2>::new();
            source.push(Frame([1, 2, 3, 4])).unwrap();

            assert_eq!(read(&mut source), Ok(Frame([1, 2, 3, 4])));
            assert_eq!(source.remaining(), 0);
        }
    }
}
