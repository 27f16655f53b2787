//! User-facing texts shared by the relay and the front-ends.

/// Returned with 400 when a submission carries no choice.
pub const INVALID_CHOICE: &str = "Lựa chọn không hợp lệ.";

/// Relay acknowledgment for "yes".
pub const ACK_YES: &str = "🎉 Niceeeeee! Anh hạnh phúc quá! Cảm ơn em rất nhiều! 🥰💕";

/// Relay acknowledgment for "no".
pub const ACK_NO: &str =
    "😔 Anh hiểu rồi. Tuy hơi buồn nhưng anh vẫn trân trọng cảm nhận của em. 💙";

/// Relay acknowledgment for any other choice value.
pub const ACK_OTHER: &str = "Cảm ơn em đã phản hồi! 💖";

/// Relay reply when processing failed but the body looked like a "yes".
pub const RELAY_FALLBACK_YES: &str = "🎉 Anh đã nhận được phản hồi của em! Anh rất hạnh phúc! 💕";

/// Relay reply when processing failed for anything else.
pub const RELAY_FALLBACK_OTHER: &str =
    "💙 Anh đã nhận được phản hồi của em. Cảm ơn em đã thành thật!";

/// Shown by a front-end when the relay could not be reached for "yes".
pub const CLIENT_FALLBACK_YES: &str =
    "🎉 Anh đã nhận được phản hồi của em rồi! Anh rất hạnh phúc! 💕";

/// Shown by a front-end when the relay could not be reached for "no".
pub const CLIENT_FALLBACK_NO: &str =
    "😔 Anh đã nhận được phản hồi của em. Cảm ơn em đã thành thật! 💙";

/// Logged in place of empty feedback.
pub const NO_FEEDBACK: &str = "Không có phản hồi";
