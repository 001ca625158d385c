//! 请求票据
//!
//! 单线程事件循环下的显式取消：每次发起异步请求时领取一个 `Ticket`，
//! 完成时只有票据仍然是最新的结果才会被采纳，其余一律丢弃。

/// 某次异步请求的标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTracker {
    current: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 发起新请求，之前发出的票据全部失效
    pub fn issue(&mut self) -> Ticket {
        self.current += 1;
        Ticket(self.current)
    }

    /// 使所有在途请求失效（输入变化 / 组件卸载）
    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let mut tracker = RequestTracker::new();
        let first = tracker.issue();
        assert!(tracker.is_current(first));

        let second = tracker.issue();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn test_invalidate_drops_in_flight_ticket() {
        let mut tracker = RequestTracker::new();
        let ticket = tracker.issue();
        tracker.invalidate();
        assert!(!tracker.is_current(ticket));

        let next = tracker.issue();
        assert_ne!(next, ticket);
        assert!(tracker.is_current(next));
    }
}
