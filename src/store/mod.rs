// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

pub mod queue;
pub mod tree;

pub use queue::IngestionQueue;
pub use tree::OrderedIndex;
