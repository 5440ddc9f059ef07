use fp_reflect::info::TypeInfo;

#[cfg(all(feature = "debug", debug_assertions))]
pub(super) use stack::TYPE_INFO_STACK;

/// Runs `f` with `info` on top of the type stack reported by serde errors.
///
/// Without the `debug` feature this only calls `f`.
#[inline]
pub(crate) fn traced<R>(info: &'static TypeInfo, f: impl FnOnce() -> R) -> R {
    #[cfg(all(feature = "debug", debug_assertions))]
    TYPE_INFO_STACK.with_borrow_mut(|stack| stack.push(info));
    #[cfg(not(all(feature = "debug", debug_assertions)))]
    let _ = info;

    let output = f();

    #[cfg(all(feature = "debug", debug_assertions))]
    TYPE_INFO_STACK.with_borrow_mut(|stack| stack.pop());

    output
}

#[cfg(all(feature = "debug", debug_assertions))]
mod stack {
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::fmt;

    use fp_reflect::info::TypeInfo;

    std::thread_local! {
        pub(crate) static TYPE_INFO_STACK: RefCell<TypeInfoStack> =
            const { RefCell::new(TypeInfoStack::new()) };
    }

    /// The types being (de)serialized, outermost first.
    #[derive(Default)]
    pub(crate) struct TypeInfoStack {
        stack: Vec<&'static TypeInfo>,
    }

    impl TypeInfoStack {
        pub const fn new() -> Self {
            Self { stack: Vec::new() }
        }

        pub fn push(&mut self, info: &'static TypeInfo) {
            self.stack.push(info);
        }

        pub fn pop(&mut self) {
            self.stack.pop();
        }
    }

    impl fmt::Debug for TypeInfoStack {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut iter = self.stack.iter();
            if let Some(first) = iter.next() {
                write!(f, "`{}`", first.type_path())?;
            }
            for info in iter {
                write!(f, " -> `{}`", info.type_path())?;
            }
            Ok(())
        }
    }
}
