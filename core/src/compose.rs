//! Right-to-left function composition.
//!
//! The middleware pipeline is built out of endomorphisms over the dispatch
//! function type: each link takes the `next` dispatch and returns a wrapped
//! one. [`compose`] folds a list of such links into one, applying the
//! rightmost first, so the leftmost link ends up as the outermost wrapper.
//!
//! `compose(vec![f, g, h])(x) == f(g(h(x)))`
//!
//! The [`compose!`](crate::compose!) macro is the static counterpart for
//! when the functions are known at compile time and boxing is unwanted.

/// A boxed endomorphism over `X`.
pub type Endomorphism<X> = Box<dyn Fn(X) -> X>;

/// Compose a list of endomorphisms, right to left.
///
/// - zero functions: the identity;
/// - one function: that function, returned unchanged;
/// - otherwise `x ↦ f1(f2(…fn(x)))`.
///
/// # Examples
///
/// ```
/// use unistore_core::compose::{compose, Endomorphism};
///
/// let double: Endomorphism<i32> = Box::new(|x| x * 2);
/// let inc: Endomorphism<i32> = Box::new(|x| x + 1);
///
/// // double(inc(5))
/// assert_eq!(compose(vec![double, inc])(5), 12);
/// assert_eq!(compose::<i32>(vec![])(5), 5);
/// ```
#[must_use]
pub fn compose<X: 'static>(mut funcs: Vec<Endomorphism<X>>) -> Endomorphism<X> {
    match funcs.len() {
        0 => Box::new(|x| x),
        1 => funcs.remove(0),
        _ => Box::new(move |x| funcs.iter().rev().fold(x, |acc, f| f(acc))),
    }
}

/// Compose functions right to left without boxing.
///
/// `compose!()` is the identity, `compose!(f)` is `f`, and
/// `compose!(f, g, h)` is `move |x| f(g(h(x)))`.
///
/// # Examples
///
/// ```
/// use unistore_core::compose;
///
/// let shout = compose!(|s: String| s + "!", |s: String| s.to_uppercase());
/// assert_eq!(shout("hey".to_string()), "HEY!");
///
/// let same = compose!();
/// assert_eq!(same(3), 3);
/// ```
#[macro_export]
macro_rules! compose {
    () => {
        |x| x
    };
    ($f:expr $(,)?) => {
        $f
    };
    ($f:expr, $($rest:expr),+ $(,)?) => {{
        let outer = $f;
        let inner = $crate::compose!($($rest),+);
        move |x| outer(inner(x))
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn boxed(f: fn(i64) -> i64) -> Endomorphism<i64> {
        Box::new(f)
    }

    #[test]
    fn test_empty_is_identity() {
        let id = compose::<String>(vec![]);
        assert_eq!(id("same".to_string()), "same");
    }

    #[test]
    fn test_single_function_unchanged() {
        let f = compose(vec![boxed(|x| x * 10)]);
        assert_eq!(f(4), 40);
    }

    #[test]
    fn test_right_to_left_order() {
        let trace = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut funcs: Vec<Endomorphism<i64>> = Vec::new();
        for name in ["f", "g", "h"] {
            let trace = std::rc::Rc::clone(&trace);
            funcs.push(Box::new(move |x| {
                trace.borrow_mut().push(name);
                x
            }));
        }

        let _ = compose(funcs)(0);
        assert_eq!(*trace.borrow(), vec!["h", "g", "f"]);
    }

    #[test]
    fn test_macro_matches_function() {
        let by_macro = compose!(|x: i64| x - 3, |x: i64| x * 2, |x: i64| x + 7);
        let by_fn = compose(vec![boxed(|x| x - 3), boxed(|x| x * 2), boxed(|x| x + 7)]);
        assert_eq!(by_macro(1), by_fn(1));
        assert_eq!(by_macro(1), 13);
    }

    proptest! {
        #[test]
        fn prop_compose_is_nested_application(
            x in -1_000_i64..1_000,
            a in -50_i64..50,
            b in 1_i64..5,
            c in -50_i64..50,
        ) {
            let f = move |v: i64| v + a;
            let g = move |v: i64| v * b;
            let h = move |v: i64| v - c;

            let composed = compose(vec![
                Box::new(f) as Endomorphism<i64>,
                Box::new(g),
                Box::new(h),
            ]);
            prop_assert_eq!(composed(x), f(g(h(x))));
        }
    }
}
