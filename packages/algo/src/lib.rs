//! # lesson-algo - 课程练习核心算法库
//!
//! 本 crate 提供纯 Rust 实现的练习选择与评估算法:
//!
//! - **Answer Normalization** - 自由文本答案规范化 (NFC、标点、空白、大小写)
//! - **Skill Estimation** - 由完成率与正确率得出 [0, 1] 的熟练度
//! - **Exercise Pool** - 按题型分组
//! - **Adaptive Selection** - 按难度层级每种题型抽取一题并打乱顺序
//! - **Answer Evaluation** - 选择题比较选项 id，其余题型比较规范化文本
//!
//! ## 设计理念
//!
//! - **纯函数** - 无 I/O、无全局状态，随机源由调用方传入
//! - **可复现** - 相同种子得到相同的练习序列
//!
//! ## 模块结构
//!
//! - [`normalize`] - 答案规范化
//! - [`options`] - 选项数据 (列表或映射) 统一为列表
//! - [`skill`] - 熟练度估计
//! - [`pool`] - 题型分组
//! - [`selector`] - 自适应选题
//! - [`evaluator`] - 答案评估
//! - [`sanitize`] - 计数器数值清理
//! - [`types`] - 公共类型和常量
//!
//! ## 使用示例
//!
//! ```rust
//! use lesson_algo::{group_by_type, skill, ExerciseSelector, ProgressSummary};
//!
//! let summary = ProgressSummary { total_exercises: 10, completed_exercises: 4, correct_answers: 2 };
//! let level = skill::estimate(&summary);
//!
//! let pool = group_by_type(Vec::new());
//! let mut selector = ExerciseSelector::with_seed(42);
//! assert!(selector.select(&pool, level).is_empty());
//! ```

// ============================================================================
// 模块声明
// ============================================================================

pub mod evaluator;
pub mod normalize;
pub mod options;
pub mod pool;
pub mod sanitize;
pub mod selector;
pub mod skill;
pub mod types;

// ============================================================================
// 重新导出
// ============================================================================

/// 重新导出所有公共类型
pub use types::*;

/// 重新导出答案规范化
pub use normalize::{answers_match, normalize, normalize_opt};

/// 重新导出选项解析
pub use options::{parse_options, parse_options_str, OptionsError, OptionsPayload};

/// 重新导出题型分组
pub use pool::{group_by_type, ExercisePool};

/// 重新导出自适应选题
pub use selector::{select, select_for_difficulty, ExerciseSelector};

/// 重新导出答案评估
pub use evaluator::{evaluate, Evaluation, EvaluationError};
