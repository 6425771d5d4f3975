//! Recording substitutes for the collaborators of the code under test.
//!
//! The code under test receives its collaborators through a parameter
//! (a closure, a trait object or a C function pointer) instead of
//! resolving them at link time, and the test hands it a [`Stub`].

use std::{
    cell::RefCell,
    collections::VecDeque,
    fmt, mem,
};

enum Responder<A, R> {
    Unset,
    Always(Box<dyn Fn(&A) -> R>),
    InOrder(VecDeque<R>),
    With(Box<dyn FnMut(&A) -> R>),
}

impl<A, R> Responder<A, R> {
    fn respond(&mut self, args: &A) -> Option<R> {
        match self {
            Responder::Unset => None,
            Responder::Always(f) => Some(f(args)),
            Responder::InOrder(queue) => queue.pop_front(),
            Responder::With(f) => Some(f(args)),
        }
    }
}

struct State<A, R> {
    calls: Vec<A>,
    responder: Responder<A, R>,
}

/// A snapshot of the interactions with a stub.
#[derive(Debug, Clone, PartialEq)]
pub struct StubInvocationRecord<A> {
    /// The arguments of every call, in order.
    pub arguments: Vec<A>,
    /// The number of calls.
    pub call_count: usize,
}

/// A stand-in for a collaborator function taking the arguments `A`
/// (a tuple for several arguments) and returning `R`.
///
/// The stub captures the arguments of every call and returns the canned
/// results configured by the running test.
pub struct Stub<A, R> {
    name: &'static str,
    state: RefCell<State<A, R>>,
}

impl<A, R> fmt::Debug for Stub<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stub")
            .field("name", &self.name)
            .field("call_count", &self.call_count())
            .finish()
    }
}

impl<A, R> Stub<A, R> {
    /// Create an unconfigured stub.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: RefCell::new(State {
                calls: vec![],
                responder: Responder::Unset,
            }),
        }
    }

    /// Return the name of the stubbed collaborator.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Return the specified value from every subsequent call.
    pub fn returns(&self, value: R) -> &Self
    where
        R: Clone + 'static,
    {
        self.state.borrow_mut().responder = Responder::Always(Box::new(move |_: &A| value.clone()));
        self
    }

    /// Return the specified values, one per call.
    ///
    /// Calls made after the values run out are treated as unconfigured.
    pub fn returns_in_order<I>(&self, values: I) -> &Self
    where
        I: IntoIterator<Item = R>,
    {
        self.state.borrow_mut().responder = Responder::InOrder(values.into_iter().collect());
        self
    }

    /// Compute the result of every subsequent call from its arguments.
    pub fn returns_with<F>(&self, f: F) -> &Self
    where
        F: FnMut(&A) -> R + 'static,
    {
        self.state.borrow_mut().responder = Responder::With(Box::new(f));
        self
    }

    /// Call the stub without panicking.
    ///
    /// The arguments are recorded even if no result is configured, in
    /// which case `None` is returned.
    ///
    /// The stub is not borrowed while the configured result is computed,
    /// so a closure passed to [`returns_with`](Self::returns_with) may
    /// inspect or reconfigure the stub itself.
    pub fn try_call(&self, args: A) -> Option<R>
    where
        A: Clone,
    {
        let mut responder = {
            let mut state = self.state.borrow_mut();
            state.calls.push(args.clone());
            mem::replace(&mut state.responder, Responder::Unset)
        };

        let response = responder.respond(&args);

        // keep a responder installed by the closure itself.
        let mut state = self.state.borrow_mut();
        if let Responder::Unset = state.responder {
            state.responder = responder;
        }
        response
    }

    /// Call the stub.
    ///
    /// # Panics
    ///
    /// Panics if no result is configured for this call. Inside a test
    /// case the panic is recorded as a failure of that test case.
    pub fn call(&self, args: A) -> R
    where
        A: Clone,
    {
        match self.try_call(args) {
            Some(response) => response,
            None => panic!(
                "stub `{}` was called without a configured result (call #{})",
                self.name,
                self.call_count()
            ),
        }
    }

    /// Adapt the stub into a closure that can be injected into the code
    /// under test.
    pub fn as_fn(&self) -> impl Fn(A) -> R + '_
    where
        A: Clone,
    {
        move |args| self.call(args)
    }

    /// Return the number of calls so far.
    pub fn call_count(&self) -> usize {
        self.state.borrow().calls.len()
    }

    /// Return the arguments of every call so far.
    pub fn calls(&self) -> Vec<A>
    where
        A: Clone,
    {
        self.state.borrow().calls.clone()
    }

    /// Return the arguments of the most recent call.
    pub fn last_call(&self) -> Option<A>
    where
        A: Clone,
    {
        self.state.borrow().calls.last().cloned()
    }

    /// Take a snapshot of the interactions so far.
    pub fn record(&self) -> StubInvocationRecord<A>
    where
        A: Clone,
    {
        let state = self.state.borrow();
        StubInvocationRecord {
            arguments: state.calls.clone(),
            call_count: state.calls.len(),
        }
    }

    /// Forget the recorded calls and the configured results.
    pub fn reset(&self) {
        let mut state = self.state.borrow_mut();
        state.calls.clear();
        state.responder = Responder::Unset;
    }
}

thread_local! {
    static EXTERN_STUBS: RefCell<Vec<fn()>> = RefCell::new(vec![]);
}

#[doc(hidden)] // private API.
pub fn register_extern_stub(reset: fn()) {
    EXTERN_STUBS.with(|stubs| stubs.borrow_mut().push(reset));
}

/// Reset every stub defined by [`stub_fn!`] that has been touched on the
/// current thread.
pub(crate) fn reset_extern_stubs() {
    let resets = EXTERN_STUBS.with(|stubs| stubs.borrow().clone());
    for reset in resets {
        reset();
    }
}

/// Define a C ABI function backed by a thread-local [`Stub`].
///
/// The generated function has exactly the declared signature, so it can
/// be handed to code that expects a C function pointer (allocators,
/// callbacks). It never unwinds: when no result is configured, the call
/// is still recorded and the fallback value after `=` is returned.
///
/// The runner resets the stub before every test case, so each test case
/// starts with no recorded calls and no configured result.
///
/// ```
/// use std::os::raw::c_void;
///
/// tally::stub_fn! {
///     static ZALLOC: extern "C" fn zalloc(opaque: *mut c_void, items: u32, size: u32) -> *mut c_void
///         = std::ptr::null_mut();
/// }
///
/// let f: extern "C" fn(*mut c_void, u32, u32) -> *mut c_void = zalloc;
/// assert!(f(std::ptr::null_mut(), 4, 8).is_null());
/// assert_eq!(ZALLOC.with(|stub| stub.call_count()), 1);
/// ```
#[macro_export]
macro_rules! stub_fn {
    ( $(#[$attr:meta])*
      $vis:vis static $stub:ident : extern "C" fn $name:ident ( $( $arg:ident : $ty:ty ),* $(,)? ) -> $ret:ty
      = $fallback:expr ;
    ) => {
        ::std::thread_local! {
            $vis static $stub: $crate::Stub<( $( $ty, )* ), $ret> = {
                fn reset() {
                    $stub.with(|stub| stub.reset());
                }
                $crate::_stub_reexports::register_extern_stub(reset);
                $crate::Stub::new(::std::stringify!($name))
            };
        }

        $(#[$attr])*
        $vis extern "C" fn $name( $( $arg : $ty ),* ) -> $ret {
            $stub
                .with(|stub| stub.try_call(( $( $arg, )* )))
                .unwrap_or_else(|| $fallback)
        }
    };
}
