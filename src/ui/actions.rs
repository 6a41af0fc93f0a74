//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,
    NextCategory,
    PrevCategory,

    // 触发特定功能
    StartSearch,
    ClearSearch,
    StartLogin,
    StartSignup,
    Logout,
    ToggleTheme,
    StartAddNote,
    StartEditNote,
    StartFeedback,

    // 表单/通用交互
    NextField,   // Tab
    CycleOption, // ←/→ 切换分类或登录/注册
    Cancel,      // Esc
    Submit,      // Enter
    Input(char), // 输入字符
    DeleteChar,  // Backspace
}
