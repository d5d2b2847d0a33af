//! Cadence Scheduler - 每秒节拍与半程回调
//!
//! 计时器只负责投递事件，不理解单词和会话状态

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// 计时器投递给会话的事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// 每秒节拍，`stream` 标识所属的节拍流
    Tick { stream: u64 },
    /// 半程回调，绑定安排时的 announce generation
    Halfway { generation: u64 },
}

/// 每秒节拍调度器
///
/// 重新启动时取消旧的节拍流；已在通道中的旧节拍由 `is_current` 过滤
pub struct CadenceScheduler {
    events: mpsc::UnboundedSender<TimerEvent>,
    token: Option<CancellationToken>,
    stream: u64,
}

impl CadenceScheduler {
    pub fn new(events: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            events,
            token: None,
            stream: 0,
        }
    }

    pub fn start(&mut self) {
        self.cancel();
        self.stream += 1;

        let token = CancellationToken::new();
        let child = token.clone();
        let events = self.events.clone();
        let stream = self.stream;

        tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    _ = interval.tick() => {
                        if child.is_cancelled() || events.send(TimerEvent::Tick { stream }).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        self.token = Some(token);
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.token.is_some()
    }

    /// 节拍是否来自当前仍在运行的节拍流
    pub fn is_current(&self, stream: u64) -> bool {
        self.token.is_some() && stream == self.stream
    }
}

impl Drop for CadenceScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// 半程回调计时器，同一时刻至多一个
pub struct HalfwayTimer {
    events: mpsc::UnboundedSender<TimerEvent>,
    token: Option<CancellationToken>,
}

impl HalfwayTimer {
    pub fn new(events: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            events,
            token: None,
        }
    }

    /// 安排回调，先取消尚未触发的旧回调
    pub fn schedule(&mut self, delay: Duration, generation: u64) {
        self.cancel();

        let token = CancellationToken::new();
        let child = token.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = child.cancelled() => {}
                _ = time::sleep(delay) => {
                    if !child.is_cancelled() {
                        let _ = events.send(TimerEvent::Halfway { generation });
                    }
                }
            }
        });

        self.token = Some(token);
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}

impl Drop for HalfwayTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
