use std::{
    io,
    sync::{Arc, Mutex},
};

use flatensor_core::Tensor;
use tracing::Level;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture(f: impl FnOnce()) -> String {
    let out = Captured::default();
    let writer = out.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = out.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn every_constructor_traces_its_allocation() {
    let logs = capture(|| {
        Tensor::<f32, 2>::zeros([3, 4]).unwrap();
        Tensor::from_vec(vec![0u8; 6], [2, 3]).unwrap();
        Tensor::from_iter_exact(0..6, [3, 2]).unwrap();
        Tensor::from_fn([2, 2], |[i, j]| i + j).unwrap();
    });
    for event in [
        "allocating tensor",
        "tensor from vec",
        "tensor from iterator",
        "tensor from fn",
    ] {
        assert!(logs.contains(event), "missing {event:?} in {logs}");
    }
}
