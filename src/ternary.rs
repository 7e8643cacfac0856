/// My ternary expression handler.  Rust's `if` is already an
/// expression, but `cargo fmt` spreads it over five lines, and the
/// edge tables in the cost graph (leftmost column, rightmost column,
/// first row) read much better one case per line.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn picks_the_matching_arm() {
        let col = 0usize;
        assert_eq!(cq!(col == 0, None, Some(col - 1)), None);
        let col = 3usize;
        assert_eq!(cq!(col == 0, None, Some(col - 1)), Some(2));
    }
}
