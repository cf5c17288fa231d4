//! Value objects of the room domain.
//!
//! Every constructor validates its input, so a value that exists is a value
//! that can be trusted by the rest of the server.

use std::fmt;

use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::error::ValueObjectError;

const ROOM_ID_MAX_LEN: usize = 64;
const USERNAME_MAX_LEN: usize = 32;
const PASSWORD_MAX_LEN: usize = 128;
const MESSAGE_CONTENT_MAX_LEN: usize = 2000;

fn validate_text(value: &str, field: &'static str, max: usize) -> Result<(), ValueObjectError> {
    if value.trim().is_empty() {
        return Err(ValueObjectError::Empty(field));
    }
    if value.chars().count() > max {
        return Err(ValueObjectError::TooLong { field, max });
    }
    Ok(())
}

/// Room identifier, chosen by the first joiner
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text(&value, "room_id", ROOM_ID_MAX_LEN)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of one live WebSocket connection, assigned by the server
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Generate a fresh identity for a new connection.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse a connection id received from a client (e.g. a signal target).
    pub fn parse(value: &str) -> Result<Self, ValueObjectError> {
        Uuid::parse_str(value)
            .map(|uuid| Self(uuid.to_string()))
            .map_err(|_| ValueObjectError::InvalidConnectionId(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display name of a participant, not unique within a room
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Surrounding whitespace is trimmed before validation.
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim().to_string();
        validate_text(&trimmed, "username", USERNAME_MAX_LEN)?;
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared room password as typed by a client
#[derive(Clone, PartialEq, Eq)]
pub struct RoomPassword(String);

impl RoomPassword {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::Empty("password"));
        }
        if value.chars().count() > PASSWORD_MAX_LEN {
            return Err(ValueObjectError::TooLong {
                field: "password",
                max: PASSWORD_MAX_LEN,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomPassword {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Debug for RoomPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RoomPassword(***)")
    }
}

/// Salted digest of a room password. Set once at room creation.
#[derive(Clone, PartialEq, Eq)]
pub struct RoomSecret([u8; 32]);

impl RoomSecret {
    /// The room id salts the digest so equal passwords differ across rooms.
    pub fn derive(room_id: &RoomId, password: &RoomPassword) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(room_id.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(password.as_str().as_bytes());
        Self(hasher.finalize().into())
    }

    pub fn verify(&self, room_id: &RoomId, password: &RoomPassword) -> bool {
        constant_time_eq(&self.0, &Self::derive(room_id, password).0)
    }
}

impl fmt::Debug for RoomSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RoomSecret(***)")
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }

    diff == 0
}

/// Chat message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text(&value, "content", MESSAGE_CONTENT_MAX_LEN)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix timestamp in milliseconds, produced by the server clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is in the future.
    pub fn millis_since(&self, earlier: Timestamp) -> u64 {
        u64::try_from(self.0.saturating_sub(earlier.0)).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_rejects_blank() {
        // テスト項目: 空白だけのルーム ID は拒否される
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = RoomId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::Empty("room_id")));
    }

    #[test]
    fn test_room_id_rejects_too_long() {
        // テスト項目: 上限を超える長さのルーム ID は拒否される
        // given (前提条件):
        let value = "r".repeat(ROOM_ID_MAX_LEN + 1);

        // when (操作):
        let result = RoomId::new(value);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::TooLong {
                field: "room_id",
                max: ROOM_ID_MAX_LEN
            })
        );
    }

    #[test]
    fn test_username_is_trimmed() {
        // テスト項目: ユーザー名の前後の空白は取り除かれる
        // given (前提条件):
        let value = "  alice ".to_string();

        // when (操作):
        let username = Username::new(value).unwrap();

        // then (期待する結果):
        assert_eq!(username.as_str(), "alice");
    }

    #[test]
    fn test_connection_id_parse_round_trips_generated_id() {
        // テスト項目: 生成した接続 ID は parse で同じ値に戻る
        // given (前提条件):
        let id = ConnectionId::generate();

        // when (操作):
        let parsed = ConnectionId::parse(id.as_str());

        // then (期待する結果):
        assert_eq!(parsed, Ok(id));
    }

    #[test]
    fn test_connection_id_parse_rejects_garbage() {
        // テスト項目: UUID でない接続 ID は拒否される
        // when (操作):
        let result = ConnectionId::parse("bob");

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::InvalidConnectionId("bob".to_string()))
        );
    }

    #[test]
    fn test_room_secret_verifies_only_matching_password() {
        // テスト項目: 作成時と同じパスワードだけが検証に通る
        // given (前提条件):
        let room_id = RoomId::new("standup".to_string()).unwrap();
        let secret = RoomSecret::derive(&room_id, &RoomPassword::new("p1".to_string()).unwrap());

        // when (操作):
        let correct = secret.verify(&room_id, &RoomPassword::new("p1".to_string()).unwrap());
        let wrong = secret.verify(&room_id, &RoomPassword::new("wrong".to_string()).unwrap());

        // then (期待する結果):
        assert!(correct);
        assert!(!wrong);
    }

    #[test]
    fn test_room_secret_is_salted_by_room_id() {
        // テスト項目: 同じパスワードでもルームが違えばダイジェストが異なる
        // given (前提条件):
        let password = RoomPassword::new("p1".to_string()).unwrap();
        let a = RoomId::new("a".to_string()).unwrap();
        let b = RoomId::new("b".to_string()).unwrap();

        // when (操作):
        let secret_a = RoomSecret::derive(&a, &password);
        let secret_b = RoomSecret::derive(&b, &password);

        // then (期待する結果):
        assert_ne!(secret_a, secret_b);
        assert!(!secret_a.verify(&b, &password));
    }

    #[test]
    fn test_password_debug_is_redacted() {
        // テスト項目: パスワードは Debug 出力に現れない
        // given (前提条件):
        let password = RoomPassword::new("hunter2".to_string()).unwrap();

        // when (操作):
        let rendered = format!("{:?}", password);

        // then (期待する結果):
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_timestamp_millis_since_saturates() {
        // テスト項目: 未来の時刻との差分は 0 になる
        // given (前提条件):
        let earlier = Timestamp::new(1_000);
        let later = Timestamp::new(4_000);

        // when (操作) / then (期待する結果):
        assert_eq!(later.millis_since(earlier), 3_000);
        assert_eq!(earlier.millis_since(later), 0);
    }
}
