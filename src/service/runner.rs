use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use log::{debug, warn};
use rayon::ThreadPoolBuilder;
use crate::models::job::{BatchOutcome, JobFailure, Outcome};

/// 同時處理的影片數上限
pub const MAX_WORKERS: usize = 5;

/// 實際啟動的工作執行緒數：不超過工作數與 `MAX_WORKERS`
pub fn effective_workers(requested: usize, total: usize) -> usize {
    requested.min(total).min(MAX_WORKERS).max(1)
}

/// 以固定大小的執行緒池執行一批彼此獨立的工作
///
/// 工作依提交順序派發，完成順序不定。每個工作的結果經由 channel 回傳給呼叫端執行緒上的
/// 收集迴圈，成功清單與完成計數只由該迴圈持有。每完成一個工作（不論成敗）呼叫一次
/// `on_progress(completed, total)`，最後一次必為 `(total, total)`。
///
/// # 參數
/// - jobs: 待處理的工作，空清單會立即回傳且不呼叫 `converter`
/// - workers: 並行上限，0 視為呼叫端錯誤
/// - converter: 將單一工作轉為結果；其中的 panic 會被記錄為該工作的失敗
/// - on_progress: 進度回呼
/// # 回傳
/// - 依完成順序排列的成功值，以及失敗的工作索引與原因
pub fn run_batch<J, T, F, P>(
    jobs: &[J],
    workers: usize,
    converter: F,
    mut on_progress: P,
) -> io::Result<BatchOutcome<T>>
where
    J: Sync,
    T: Send,
    F: Fn(&J) -> Outcome<T> + Sync,
    P: FnMut(usize, usize),
{
    if workers == 0 {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "並行數必須至少為 1"));
    }

    let total = jobs.len();
    let mut outcome = BatchOutcome::empty(total);
    if total == 0 {
        return Ok(outcome);
    }

    let threads = effective_workers(workers, total);
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("overlay-worker-{}", i))
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("無法建立執行緒池: {}", e)))?;
    debug!("啟動 {} 個工作執行緒處理 {} 個工作", threads, total);

    let (tx, rx) = mpsc::channel::<(usize, Outcome<T>)>();
    let converter = &converter;

    pool.in_place_scope(|scope| {
        for (index, job) in jobs.iter().enumerate() {
            let tx = tx.clone();
            scope.spawn(move |_| {
                let result = panic::catch_unwind(AssertUnwindSafe(|| converter(job)))
                    .unwrap_or_else(|payload| Outcome::Failure(panic_message(payload)));
                // 收集迴圈在所有工作回報前不會結束
                let _ = tx.send((index, result));
            });
        }
        drop(tx);

        for (index, result) in rx.iter() {
            outcome.completed += 1;
            match result {
                Outcome::Success(value) => outcome.successes.push(value),
                Outcome::Failure(reason) => {
                    warn!("工作 #{} 失敗：{}", index, reason);
                    outcome.failures.push(JobFailure { index, reason });
                }
            }
            on_progress(outcome.completed, total);
        }
    });

    Ok(outcome)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("處理時發生 panic：{}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("處理時發生 panic：{}", msg)
    } else {
        "處理時發生 panic".to_string()
    }
}
