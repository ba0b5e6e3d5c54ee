// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 特征提取错误类型
///
/// 只有输入层面的错误会向调用方传播，探测失败在探测边界内部被吸收为哨兵值
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("无效的URL: {0}")]
    InvalidUrl(String),

    #[error("初始化失败: {0}")]
    InitializationFailed(String),
}

/// 特征列与分类器训练列不一致
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaMismatch {
    #[error("特征数量不一致: 期望 {expected}, 实际 {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("第 {position} 列不一致: 期望 {expected}, 实际 {actual}")]
    ColumnMismatch {
        position: usize,
        expected: String,
        actual: String,
    },
}
