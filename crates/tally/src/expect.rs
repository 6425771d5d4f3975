//! Soft checks.
//!
//! Every method records exactly one check result and returns whether
//! the check passed. None of them panics or terminates the test case,
//! so a single run can surface any number of independent failures.

use crate::{context::Context, stub::Stub, test::Location};
use std::{fmt, ptr::NonNull};

/// Values that have a null sentinel.
pub trait Nullable {
    /// Return whether the value is the null sentinel.
    fn is_null_value(&self) -> bool;
}

impl<T: ?Sized> Nullable for *const T {
    #[inline]
    fn is_null_value(&self) -> bool {
        self.is_null()
    }
}

impl<T: ?Sized> Nullable for *mut T {
    #[inline]
    fn is_null_value(&self) -> bool {
        self.is_null()
    }
}

impl<T> Nullable for Option<T> {
    #[inline]
    fn is_null_value(&self) -> bool {
        self.is_none()
    }
}

impl<T: ?Sized> Nullable for NonNull<T> {
    #[inline]
    fn is_null_value(&self) -> bool {
        false
    }
}

impl<T: ?Sized + Nullable> Nullable for &T {
    #[inline]
    fn is_null_value(&self) -> bool {
        (**self).is_null_value()
    }
}

impl Context<'_> {
    /// Check that `condition` holds.
    #[track_caller]
    pub fn expect_true(&mut self, condition: bool, message: impl fmt::Display) -> bool {
        let location = Location::caller();
        self.record(condition, message.to_string(), Some(location))
    }

    /// Check that `condition` does not hold.
    #[track_caller]
    pub fn expect_false(&mut self, condition: bool, message: impl fmt::Display) -> bool {
        let location = Location::caller();
        self.record(!condition, message.to_string(), Some(location))
    }

    /// Check that two values are equal.
    ///
    /// Strings and C strings are compared byte-wise, floating point
    /// numbers exactly. Use [`expect_approx_eq`] for computed floats and
    /// [`expect_same`] for pointer identity.
    ///
    /// [`expect_approx_eq`]: Context::expect_approx_eq
    /// [`expect_same`]: Context::expect_same
    #[track_caller]
    pub fn expect_eq<A, E>(&mut self, actual: A, expected: E, message: impl fmt::Display) -> bool
    where
        A: PartialEq<E> + fmt::Debug,
        E: fmt::Debug,
    {
        let location = Location::caller();
        if actual == expected {
            self.record(true, message.to_string(), Some(location))
        } else {
            self.record(
                false,
                format!("{}: expected `{:?}`, found `{:?}`", message, expected, actual),
                Some(location),
            )
        }
    }

    /// Check that two values differ.
    #[track_caller]
    pub fn expect_ne<A, E>(&mut self, actual: A, unexpected: E, message: impl fmt::Display) -> bool
    where
        A: PartialEq<E> + fmt::Debug,
        E: fmt::Debug,
    {
        let location = Location::caller();
        if actual != unexpected {
            self.record(true, message.to_string(), Some(location))
        } else {
            self.record(
                false,
                format!("{}: expected a value other than `{:?}`", message, unexpected),
                Some(location),
            )
        }
    }

    /// Check that `actual` lies within `tolerance` of `expected`.
    ///
    /// NaN never compares approximately equal to anything.
    #[track_caller]
    pub fn expect_approx_eq<T>(
        &mut self,
        actual: T,
        expected: T,
        tolerance: T,
        message: impl fmt::Display,
    ) -> bool
    where
        T: Into<f64>,
    {
        let location = Location::caller();
        let (actual, expected, tolerance) = (actual.into(), expected.into(), tolerance.into());
        let delta = (actual - expected).abs();
        if delta <= tolerance {
            self.record(true, message.to_string(), Some(location))
        } else {
            self.record(
                false,
                format!(
                    "{}: expected `{}` (+/- {}), found `{}`",
                    message, expected, tolerance, actual
                ),
                Some(location),
            )
        }
    }

    /// Check that `value` is the null sentinel.
    #[track_caller]
    pub fn expect_null<T>(&mut self, value: T, message: impl fmt::Display) -> bool
    where
        T: Nullable,
    {
        let location = Location::caller();
        if value.is_null_value() {
            self.record(true, message.to_string(), Some(location))
        } else {
            self.record(false, format!("{}: expected null", message), Some(location))
        }
    }

    /// Check that `value` is not the null sentinel.
    #[track_caller]
    pub fn expect_not_null<T>(&mut self, value: T, message: impl fmt::Display) -> bool
    where
        T: Nullable,
    {
        let location = Location::caller();
        if value.is_null_value() {
            self.record(false, format!("{}: unexpected null", message), Some(location))
        } else {
            self.record(true, message.to_string(), Some(location))
        }
    }

    /// Check that two pointers refer to the same address.
    #[track_caller]
    pub fn expect_same<T: ?Sized>(
        &mut self,
        actual: *const T,
        expected: *const T,
        message: impl fmt::Display,
    ) -> bool {
        let location = Location::caller();
        if std::ptr::eq(actual, expected) {
            self.record(true, message.to_string(), Some(location))
        } else {
            self.record(
                false,
                format!("{}: expected address {:p}, found {:p}", message, expected, actual),
                Some(location),
            )
        }
    }

    /// Check the number of times a stub has been called.
    #[track_caller]
    pub fn expect_call_count<A, R>(
        &mut self,
        stub: &Stub<A, R>,
        expected: usize,
        message: impl fmt::Display,
    ) -> bool {
        let location = Location::caller();
        let actual = stub.call_count();
        if actual == expected {
            self.record(true, message.to_string(), Some(location))
        } else {
            self.record(
                false,
                format!(
                    "{}: expected `{}` to be called {} time(s), but it was called {} time(s)",
                    message,
                    stub.name(),
                    expected,
                    actual
                ),
                Some(location),
            )
        }
    }
}
