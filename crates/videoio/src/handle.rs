use std::ptr;

pub(crate) type ReleaseFn<H> = unsafe extern "C" fn(handle: *mut *mut H);

/// Exclusive owner of one handle created by the external library.
///
/// The release function is required to null the handle. A release that leaves
/// it set, or a missing release function for a live handle, is a broken
/// integration and panics.
pub(crate) struct Handle<H> {
    ptr: *mut H,
    release: Option<ReleaseFn<H>>,
    kind: &'static str,
}

// The handle is only ever used by its single owner; moving that owner to
// another thread is fine.
unsafe impl<H> Send for Handle<H> {}

impl<H> Handle<H> {
    pub fn null(kind: &'static str, release: Option<ReleaseFn<H>>) -> Self {
        Self {
            ptr: ptr::null_mut(),
            release,
            kind,
        }
    }

    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    pub fn as_ptr(&self) -> *mut H {
        self.ptr
    }

    /// Releases the current handle, then takes ownership of `ptr`.
    pub fn reset(&mut self, ptr: *mut H) {
        self.release();
        self.ptr = ptr;
    }

    /// No-op when the handle is already null.
    pub fn release(&mut self) {
        if self.ptr.is_null() {
            return;
        }
        if let Some(release) = self.release {
            // Safety: ptr came from the matching create call and has not been released.
            unsafe { release(&mut self.ptr) };
        }
        if !self.ptr.is_null() {
            let leaked = self.ptr;
            // cleared so that dropping the owner during unwinding does not release twice
            self.ptr = ptr::null_mut();
            log::error!("{} release did not clear handle {:p}", self.kind, leaked);
            panic!("{} release did not clear handle {:p}", self.kind, leaked);
        }
    }
}

impl<H> Drop for Handle<H> {
    fn drop(&mut self) {
        self.release();
    }
}
