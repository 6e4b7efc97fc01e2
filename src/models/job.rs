use std::fmt;
use std::path::PathBuf;

/// 單支影片的處理工作
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub index: usize,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub logo: PathBuf,
    pub width: u32,
    pub overlay: String,
}

/// 單一工作的執行結果，以值回傳而非拋出
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failure(String),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn from_result<E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(e) => Outcome::Failure(e.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobFailure {
    pub index: usize,
    pub reason: String,
}

/// 一次批次的彙整結果，`successes` 依完成順序排列
#[derive(Debug)]
pub struct BatchOutcome<T> {
    pub successes: Vec<T>,
    pub failures: Vec<JobFailure>,
    pub completed: usize,
    pub total: usize,
}

impl<T> BatchOutcome<T> {
    pub fn empty(total: usize) -> Self {
        BatchOutcome {
            successes: Vec::with_capacity(total),
            failures: Vec::new(),
            completed: 0,
            total,
        }
    }

    pub fn all_failed(&self) -> bool {
        self.total > 0 && self.successes.is_empty()
    }
}
