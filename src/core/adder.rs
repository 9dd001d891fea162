use std::ops::Add;

/// 兩數相加，沿用型別本身的加法語意 (整數 / IEEE 浮點)
pub fn sum<T: Add<Output = T>>(a: T, b: T) -> T {
    a + b
}
