// Box Watcher Module - 内容盒尺寸监视
//
// BoxWatcher 是观察器依赖的第一个注入能力：订阅某个容器内容盒的变化，
// 并能取消订阅。
//
// BoxRegistry 是单线程实现，扮演布局树的角色：
// - 容器先挂载(mount)才能被监视
// - set_content_box 只在尺寸确实变化时通知订阅者
// - relayout 强制重新投递当前尺寸（模拟一次额外的布局过程）
// - unmount 向订阅者投递 Removed 后移除它们的订阅

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::geometry::ContentRect;

/// 容器句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container#{}", self.0)
    }
}

/// 订阅句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchId(u64);

/// 投递给订阅者的通知
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxNotification {
    /// 内容盒尺寸变化
    Resized(ContentRect),
    /// 容器已从布局树中移除
    Removed,
}

/// 订阅回调
pub type BoxCallback = Box<dyn FnMut(BoxNotification)>;

/// 监视错误
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WatchError {
    /// 容器尚未挂载到布局树
    #[error("{0} is not mounted in the layout tree")]
    ContainerNotMounted(ContainerId),
}

/// 内容盒监视器trait
pub trait BoxWatcher {
    /// 订阅容器内容盒的变化
    fn watch(&self, container: ContainerId, callback: BoxCallback) -> Result<WatchId, WatchError>;

    /// 取消订阅，返回订阅是否存在
    fn unwatch(&self, id: WatchId) -> bool;

    /// 容器当前已测量的内容盒，未挂载或未测量时为None
    fn content_box(&self, container: ContainerId) -> Option<ContentRect>;
}

struct Watch {
    container: ContainerId,
    callback: Rc<RefCell<BoxCallback>>,
}

#[derive(Default)]
struct RegistryInner {
    next_container: u64,
    next_watch: u64,
    /// 已挂载的容器及其最近测量的内容盒
    containers: HashMap<ContainerId, Option<ContentRect>>,
    watches: HashMap<WatchId, Watch>,
    delivered: u64,
}

/// 单线程布局树/尺寸监视注册表
///
/// 克隆得到的是共享同一注册表的句柄。
#[derive(Clone, Default)]
pub struct BoxRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl BoxRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 挂载一个尚未测量的容器
    pub fn mount(&self) -> ContainerId {
        let mut inner = self.inner.borrow_mut();
        let id = ContainerId(inner.next_container);
        inner.next_container += 1;
        inner.containers.insert(id, None);
        log::debug!("mounted {}", id);
        id
    }

    /// 挂载一个已有初始尺寸的容器
    pub fn mount_with(&self, rect: ContentRect) -> ContainerId {
        let id = self.mount();
        self.inner.borrow_mut().containers.insert(id, Some(rect));
        id
    }

    /// 容器是否仍在布局树中
    pub fn is_mounted(&self, container: ContainerId) -> bool {
        self.inner.borrow().containers.contains_key(&container)
    }

    /// 更新容器的内容盒，尺寸变化时通知订阅者
    ///
    /// 返回收到通知的订阅者数量。
    pub fn set_content_box(&self, container: ContainerId, rect: ContentRect) -> usize {
        {
            let mut inner = self.inner.borrow_mut();
            match inner.containers.get_mut(&container) {
                Some(current) if *current == Some(rect) => return 0,
                Some(current) => *current = Some(rect),
                None => {
                    log::warn!("set_content_box on unmounted {}", container);
                    return 0;
                }
            }
        }
        self.deliver(container, BoxNotification::Resized(rect))
    }

    /// 以当前尺寸重新通知订阅者，即使尺寸没有变化
    pub fn relayout(&self, container: ContainerId) -> usize {
        let current = self.inner.borrow().containers.get(&container).copied().flatten();
        match current {
            Some(rect) => self.deliver(container, BoxNotification::Resized(rect)),
            None => 0,
        }
    }

    /// 从布局树中移除容器，订阅者先收到 Removed，然后订阅被清理
    pub fn unmount(&self, container: ContainerId) -> bool {
        if self.inner.borrow_mut().containers.remove(&container).is_none() {
            return false;
        }
        self.deliver(container, BoxNotification::Removed);
        self.inner
            .borrow_mut()
            .watches
            .retain(|_, watch| watch.container != container);
        log::debug!("unmounted {}", container);
        true
    }

    /// 当前订阅数量
    pub fn watch_count(&self) -> usize {
        self.inner.borrow().watches.len()
    }

    /// 某个容器的订阅数量
    pub fn watchers_of(&self, container: ContainerId) -> usize {
        self.inner
            .borrow()
            .watches
            .values()
            .filter(|watch| watch.container == container)
            .count()
    }

    /// 已投递的通知总数
    pub fn delivered(&self) -> u64 {
        self.inner.borrow().delivered
    }

    /// 投递通知；回调执行期间不持有注册表借用
    fn deliver(&self, container: ContainerId, notification: BoxNotification) -> usize {
        let mut targets: Vec<(WatchId, Rc<RefCell<BoxCallback>>)> = self
            .inner
            .borrow()
            .watches
            .iter()
            .filter(|(_, watch)| watch.container == container)
            .map(|(id, watch)| (*id, Rc::clone(&watch.callback)))
            .collect();
        targets.sort_by_key(|(id, _)| *id);

        let mut count = 0;
        for (id, callback) in targets {
            // 前一个回调可能已经取消了这个订阅
            if !self.inner.borrow().watches.contains_key(&id) {
                continue;
            }
            self.inner.borrow_mut().delivered += 1;
            (&mut *callback.borrow_mut())(notification);
            count += 1;
        }
        count
    }
}

impl BoxWatcher for BoxRegistry {
    fn watch(&self, container: ContainerId, callback: BoxCallback) -> Result<WatchId, WatchError> {
        let mut inner = self.inner.borrow_mut();
        if !inner.containers.contains_key(&container) {
            return Err(WatchError::ContainerNotMounted(container));
        }
        let id = WatchId(inner.next_watch);
        inner.next_watch += 1;
        inner.watches.insert(
            id,
            Watch {
                container,
                callback: Rc::new(RefCell::new(callback)),
            },
        );
        Ok(id)
    }

    fn unwatch(&self, id: WatchId) -> bool {
        self.inner.borrow_mut().watches.remove(&id).is_some()
    }

    fn content_box(&self, container: ContainerId) -> Option<ContentRect> {
        self.inner.borrow().containers.get(&container).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<BoxNotification>>>, BoxCallback) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, Box::new(move |n| sink.borrow_mut().push(n)))
    }

    #[test]
    fn test_watch_requires_mounted_container() {
        let registry = BoxRegistry::new();
        let container = registry.mount();
        registry.unmount(container);

        let (_, callback) = recorder();
        assert_eq!(
            registry.watch(container, callback),
            Err(WatchError::ContainerNotMounted(container))
        );
    }

    #[test]
    fn test_only_changes_are_delivered() {
        let registry = BoxRegistry::new();
        let container = registry.mount();
        let (seen, callback) = recorder();
        registry.watch(container, callback).unwrap();

        let rect = ContentRect::new(800.0, 600.0);
        assert_eq!(registry.set_content_box(container, rect), 1);
        assert_eq!(registry.set_content_box(container, rect), 0);
        assert_eq!(registry.relayout(container), 1);

        assert_eq!(
            *seen.borrow(),
            vec![BoxNotification::Resized(rect), BoxNotification::Resized(rect)]
        );
        assert_eq!(registry.content_box(container), Some(rect));
    }

    #[test]
    fn test_unmount_notifies_and_drops_watches() {
        let registry = BoxRegistry::new();
        let container = registry.mount_with(ContentRect::new(10.0, 10.0));
        let (seen, callback) = recorder();
        registry.watch(container, callback).unwrap();
        assert_eq!(registry.watchers_of(container), 1);

        assert!(registry.unmount(container));
        assert!(!registry.unmount(container));
        assert_eq!(*seen.borrow(), vec![BoxNotification::Removed]);
        assert_eq!(registry.watch_count(), 0);
        assert_eq!(registry.content_box(container), None);
    }

    #[test]
    fn test_unwatched_callback_is_not_called() {
        let registry = BoxRegistry::new();
        let container = registry.mount();
        let (seen, callback) = recorder();
        let id = registry.watch(container, callback).unwrap();

        assert!(registry.unwatch(id));
        registry.set_content_box(container, ContentRect::new(1.0, 2.0));
        assert!(seen.borrow().is_empty());
    }
}
