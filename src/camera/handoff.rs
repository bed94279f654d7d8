//! Lock-free publication of the latest view matrix.
//!
//! The camera tick is the only writer and the frame scheduler the only
//! reader. A triple buffer lets each side work on its own copy, so a reader
//! never observes a half-written matrix and neither side ever blocks.

use glam::Mat4;

/// Writing half, owned by the camera tick.
pub struct ViewPublisher {
    input: triple_buffer::Input<Mat4>,
}

/// Reading half, owned by the render path.
pub struct ViewReader {
    output: triple_buffer::Output<Mat4>,
}

/// Create a connected publisher/reader pair seeded with `initial`.
#[must_use]
pub fn view_channel(initial: Mat4) -> (ViewPublisher, ViewReader) {
    let (input, output) = triple_buffer::triple_buffer(&initial);
    (ViewPublisher { input }, ViewReader { output })
}

impl ViewPublisher {
    /// Make `view` the matrix the next [`ViewReader::latest`] returns.
    pub fn publish(&mut self, view: Mat4) {
        self.input.write(view);
    }
}

impl ViewReader {
    /// Most recently published view matrix.
    pub fn latest(&mut self) -> Mat4 {
        *self.output.read()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn reader_sees_initial_then_latest() {
        let (mut publisher, mut reader) = view_channel(Mat4::IDENTITY);
        assert_eq!(reader.latest(), Mat4::IDENTITY);

        let a = Mat4::from_translation(Vec3::X);
        let b = Mat4::from_translation(Vec3::Y);
        publisher.publish(a);
        publisher.publish(b);
        assert_eq!(reader.latest(), b);
        // Repeated reads without a new publish return the same matrix.
        assert_eq!(reader.latest(), b);
    }

    #[test]
    fn concurrent_reads_are_never_torn() {
        let (mut publisher, mut reader) = view_channel(Mat4::IDENTITY);
        let writer = std::thread::spawn(move || {
            for i in 1..=20_000 {
                let view = Mat4::from_translation(Vec3::splat(i as f32));
                publisher.publish(view);
            }
        });

        let mut last = 0.0;
        loop {
            let view = reader.latest();
            let t = view.w_axis;
            assert_eq!(t.x, t.y);
            assert_eq!(t.y, t.z);
            assert!(t.x >= last);
            last = t.x;
            if writer.is_finished() && last == 20_000.0 {
                break;
            }
            if writer.is_finished() {
                // One more read picks up the final publish.
                assert_eq!(reader.latest().w_axis.x, 20_000.0);
                break;
            }
        }
        writer.join().unwrap();
    }
}
