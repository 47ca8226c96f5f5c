/// Keyed scalar values travelling with a request, read by generated injectors.
///
/// Every getter except [`Carrier::get_string`] takes the value to return when
/// the key is absent; an absent string is reported as `None`.
pub trait Carrier {
    fn get_string(&self, key: &str) -> Option<String>;
    fn get_int(&self, key: &str, default: i32) -> i32;
    fn get_long(&self, key: &str, default: i64) -> i64;
    fn get_float(&self, key: &str, default: f32) -> f32;
    fn get_double(&self, key: &str, default: f64) -> f64;
    fn get_boolean(&self, key: &str, default: bool) -> bool;
    fn get_char(&self, key: &str, default: char) -> char;
    fn get_byte(&self, key: &str, default: i8) -> i8;
    fn get_short(&self, key: &str, default: i16) -> i16;
}

/// Implemented by owners of carrier-injected fields, gives injectors access to the request carrier.
pub trait CarrierHost {
    fn carrier(&self) -> &dyn Carrier;
}
