//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that classifies local authentication errors.

use serde::Serialize;

/// エラー種別の列挙体
///
/// ローカル再認証ゲートで発生するエラーの分類を定義します。
/// 各バリアントは「その場で再試行できるか」「セキュリティイベントとして
/// 記録すべきか」の判定にマッピングされます。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Validation;
/// assert!(kind.is_recoverable());
/// assert_eq!(kind.as_str(), "Validation");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Validation: 入力値が不正（その場で修正して再試行できる）
    Validation,
    /// Unauthorized: 認証に失敗（コード不一致など）
    Unauthorized,
    /// Locked: 失敗回数の上限超過によるロックアウト
    Locked,
    /// Cancelled: ユーザーによる中断
    Cancelled,
    /// Busy: 別の認証処理が進行中
    Busy,
    /// Unavailable: プラットフォーム機能が利用不可
    Unavailable,
    /// Storage: セキュアストレージの障害
    Storage,
    /// Internal: 内部エラー
    Internal,
}

impl ErrorKind {
    /// ユーザー向けの文字列表現を取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::Unauthorized.as_str(), "Unauthorized");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Validation",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Locked => "Locked",
            ErrorKind::Cancelled => "Cancelled",
            ErrorKind::Busy => "Busy",
            ErrorKind::Unavailable => "Unavailable",
            ErrorKind::Storage => "Storage",
            ErrorKind::Internal => "Internal",
        }
    }

    /// その場で再試行できるエラーかどうかを判定
    ///
    /// `true` の場合、呼び出し側は同じフローを維持したまま
    /// 再入力・再評価を促すべきです。
    #[inline]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorKind::Validation
                | ErrorKind::Unauthorized
                | ErrorKind::Cancelled
                | ErrorKind::Busy
                | ErrorKind::Unavailable
        )
    }

    /// セキュリティイベントとして記録すべきかどうかを判定
    ///
    /// 認証失敗・ロックアウトは監査ログの対象です。
    #[inline]
    pub const fn is_security_event(&self) -> bool {
        matches!(self, ErrorKind::Unauthorized | ErrorKind::Locked)
    }

    /// 実装側の障害かどうかを判定
    ///
    /// ストレージ障害・内部エラーは `true` を返します。
    /// これらのエラーはログに記録すべきです。
    #[inline]
    pub const fn is_fault(&self) -> bool {
        matches!(self, ErrorKind::Storage | ErrorKind::Internal)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
