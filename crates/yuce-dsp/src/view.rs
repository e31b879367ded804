//! 带原点偏移与跨度的平面视图.
//!
//! 内核通过视图访问带边距的平面: `offset` 指向块左上角, 允许以负坐标读取边距.

/// 只读平面视图
pub struct PlaneView<'a, T> {
    data: &'a [T],
    offset: usize,
    stride: usize,
}

impl<T> Clone for PlaneView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PlaneView<'_, T> {}

impl<'a, T: Copy> PlaneView<'a, T> {
    pub fn new(data: &'a [T], offset: usize, stride: usize) -> Self {
        Self {
            data,
            offset,
            stride,
        }
    }

    pub fn data(&self) -> &'a [T] {
        self.data
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    fn index(&self, x: isize, y: isize) -> usize {
        (self.offset as isize + y * self.stride as isize + x) as usize
    }

    /// 读取相对原点 (x, y) 处的采样
    #[inline]
    pub fn at(&self, x: isize, y: isize) -> T {
        self.data[self.index(x, y)]
    }

    /// 第 y 行从 x 开始的 len 个采样
    #[inline]
    pub fn row_from(&self, x: isize, y: isize, len: usize) -> &'a [T] {
        let start = self.index(x, y);
        &self.data[start..start + len]
    }

    /// 第 y 行从原点列开始的 len 个采样
    #[inline]
    pub fn row(&self, y: usize, len: usize) -> &'a [T] {
        self.row_from(0, y as isize, len)
    }

    /// 原点平移 (dx, dy) 后的视图
    pub fn shifted(&self, dx: isize, dy: isize) -> Self {
        Self {
            data: self.data,
            offset: self.index(dx, dy),
            stride: self.stride,
        }
    }
}

/// 可写平面视图
pub struct PlaneViewMut<'a, T> {
    data: &'a mut [T],
    offset: usize,
    stride: usize,
}

impl<'a, T: Copy> PlaneViewMut<'a, T> {
    pub fn new(data: &'a mut [T], offset: usize, stride: usize) -> Self {
        Self {
            data,
            offset,
            stride,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// 第 y 行从原点列开始的 len 个可写采样
    #[inline]
    pub fn row_mut(&mut self, y: usize, len: usize) -> &mut [T] {
        let start = self.offset + y * self.stride;
        &mut self.data[start..start + len]
    }

    /// 写入 (x, y)
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        self.data[self.offset + y * self.stride + x] = value;
    }

    /// 只读视图
    pub fn as_view(&self) -> PlaneView<'_, T> {
        PlaneView::new(self.data, self.offset, self.stride)
    }

    /// 重新借用
    pub fn reborrow(&mut self) -> PlaneViewMut<'_, T> {
        PlaneViewMut::new(self.data, self.offset, self.stride)
    }
}
