use std::ops::{Deref, DerefMut};

/// Scratch vector that is either borrowed from the caller or owned for
/// the duration of a single solve.
///
/// A caller supplied buffer is truncated to the requested length and
/// reused in place.  Otherwise a zeroed vector is allocated and dropped
/// with the workspace.
#[derive(Debug)]
pub(crate) enum Workspace<'a, T> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<'a, T> Workspace<'a, T>
where
    T: Copy,
{
    /// # Panics
    /// Panics if a supplied buffer is shorter than `len`.
    pub(crate) fn new(buffer: Option<&'a mut [T]>, len: usize, fill: T) -> Self {
        match buffer {
            Some(buf) => {
                assert!(
                    buf.len() >= len,
                    "scratch buffer of length {} is shorter than required length {}",
                    buf.len(),
                    len
                );
                Workspace::Borrowed(&mut buf[..len])
            }
            None => Workspace::Owned(vec![fill; len]),
        }
    }

    pub(crate) fn is_borrowed(&self) -> bool {
        matches!(self, Workspace::Borrowed(_))
    }
}

impl<T> Deref for Workspace<'_, T> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        match self {
            Workspace::Borrowed(buf) => buf,
            Workspace::Owned(buf) => buf,
        }
    }
}

impl<T> DerefMut for Workspace<'_, T> {
    fn deref_mut(&mut self) -> &mut [T] {
        match self {
            Workspace::Borrowed(buf) => buf,
            Workspace::Owned(buf) => buf,
        }
    }
}

#[test]
fn test_workspace_ownership() {
    let mut storage = vec![7.0; 5];
    {
        let mut ws = Workspace::new(Some(&mut storage[..]), 3, 0.0);
        assert!(ws.is_borrowed());
        assert_eq!(ws.len(), 3);
        ws[0] = 1.0;
    }
    assert_eq!(storage, vec![1.0, 7.0, 7.0, 7.0, 7.0]);

    let ws: Workspace<f64> = Workspace::new(None, 4, 0.0);
    assert!(!ws.is_borrowed());
    assert_eq!(&*ws, &[0.0; 4]);
}
