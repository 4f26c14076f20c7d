/// Formats a counting number in base 2 without leading zeros.
pub fn to_binary(number: u64) -> String {
    format!("{:b}", number)
}
