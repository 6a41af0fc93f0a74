use std::fmt;
use std::sync::LazyLock;

use chrono::{Local, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 笔记分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    React,
    Nodejs,
    Mobileapp,
    Code,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::React,
        Category::Nodejs,
        Category::Mobileapp,
        Category::Code,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::React => "React",
            Category::Nodejs => "NodeJS",
            Category::Mobileapp => "Mobile App",
            Category::Code => "Code Snippets",
        }
    }

    /// ALL 中的位置
    pub fn index(self) -> usize {
        Category::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Category::ALL[(self.index() + 1) % Category::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let len = Category::ALL.len();
        Category::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Category::React => "react",
            Category::Nodejs => "nodejs",
            Category::Mobileapp => "mobileapp",
            Category::Code => "code",
        };
        f.write_str(tag)
    }
}

/// 登录用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub is_admin: bool,
}

impl User {
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            username: username.into(),
            is_admin,
        }
    }
}

/// 学习笔记（问答）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub created_at: String,
}

impl Note {
    /// 新建笔记，id 取当前毫秒时间戳
    pub fn new(
        question: String,
        answer: String,
        category: Category,
        code: Option<String>,
    ) -> Self {
        Self {
            id: Utc::now().timestamp_millis().to_string(),
            question,
            answer,
            category,
            code: code.filter(|_| category == Category::Code),
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// 任一字段包含 needle（needle 需已小写）
    pub fn matches(&self, needle: &str) -> bool {
        self.question.to_lowercase().contains(needle)
            || self.answer.to_lowercase().contains(needle)
            || self
                .code
                .as_deref()
                .is_some_and(|code| code.to_lowercase().contains(needle))
    }
}

const DARK_MODE_SNIPPET: &str = r#"// Using React Context
const ThemeContext = React.createContext();

function ThemeProvider({ children }) {
  const [theme, setTheme] = useState('light');

  const toggleTheme = () => {
    setTheme(prevTheme => prevTheme === 'light' ? 'dark' : 'light');
  };

  return (
    <ThemeContext.Provider value={{ theme, toggleTheme }}>
      {children}
    </ThemeContext.Provider>
  );
}"#;

/// 启动时的演示数据
pub fn seed_notes() -> Vec<Note> {
    let now = Local::now().to_rfc3339();
    let seed = |id: &str, question: &str, answer: &str, category, code: Option<&str>| Note {
        id: id.to_string(),
        question: question.to_string(),
        answer: answer.to_string(),
        category,
        code: code.map(str::to_string),
        created_at: now.clone(),
    };

    vec![
        seed(
            "1",
            "What is React?",
            "React is a JavaScript library for building user interfaces, particularly single-page applications.",
            Category::React,
            None,
        ),
        seed(
            "2",
            "What are React Hooks?",
            "Hooks are functions that let you \"hook into\" React state and lifecycle features from function components.",
            Category::React,
            None,
        ),
        seed(
            "3",
            "What is Node.js?",
            "Node.js is a JavaScript runtime built on Chrome's V8 JavaScript engine for building scalable network applications.",
            Category::Nodejs,
            None,
        ),
        seed(
            "4",
            "What is Express.js?",
            "Express is a minimal and flexible Node.js web application framework that provides a robust set of features for web and mobile applications.",
            Category::Nodejs,
            None,
        ),
        seed(
            "5",
            "What is React Native?",
            "React Native is a framework for building native mobile apps using React and JavaScript.",
            Category::Mobileapp,
            None,
        ),
        seed(
            "6",
            "How to implement Dark Mode in React?",
            "You can implement dark mode using CSS variables, styled-components, or context API to manage the theme state.",
            Category::Code,
            Some(DARK_MODE_SNIPPET),
        ),
    ]
}

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// 反馈表单
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: String,
}

impl FeedbackData {
    pub fn new(name: String, email: String, message: String) -> Self {
        Self {
            id: Utc::now().timestamp_millis().to_string(),
            name,
            email,
            message,
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// 校验表单，返回首个错误提示
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.message.trim().is_empty()
        {
            return Err("All fields are required");
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err("Please enter a valid email address");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_distribution() {
        let notes = seed_notes();
        assert_eq!(notes.len(), 6);
        let count = |c| notes.iter().filter(|n| n.category == c).count();
        assert_eq!(count(Category::React), 2);
        assert_eq!(count(Category::Nodejs), 2);
        assert_eq!(count(Category::Mobileapp), 1);
        assert_eq!(count(Category::Code), 1);
        assert!(notes[5].code.is_some());
    }

    #[test]
    fn test_new_note_drops_code_outside_code_category() {
        let note = Note::new(
            "Q".to_string(),
            "A".to_string(),
            Category::React,
            Some("let x = 1;".to_string()),
        );
        assert!(note.code.is_none());

        let note = Note::new(
            "Q".to_string(),
            "A".to_string(),
            Category::Code,
            Some("let x = 1;".to_string()),
        );
        assert_eq!(note.code.as_deref(), Some("let x = 1;"));
    }

    #[test]
    fn test_category_cycle() {
        assert_eq!(Category::Code.next(), Category::React);
        assert_eq!(Category::React.prev(), Category::Code);
        assert_eq!(Category::Mobileapp.to_string(), "mobileapp");
    }

    #[test]
    fn test_feedback_validation() {
        let ok = FeedbackData::new(
            "Ann".to_string(),
            "ann@example.com".to_string(),
            "Nice notes".to_string(),
        );
        assert!(ok.validate().is_ok());

        let missing = FeedbackData::new("Ann".to_string(), " ".to_string(), "Hi".to_string());
        assert_eq!(missing.validate(), Err("All fields are required"));

        let bad = FeedbackData::new("Ann".to_string(), "ann@example".to_string(), "Hi".to_string());
        assert_eq!(bad.validate(), Err("Please enter a valid email address"));
    }
}
