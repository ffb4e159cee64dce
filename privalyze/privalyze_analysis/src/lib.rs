// Copyright (c) 2022 Ubique Innovation AG <https://www.ubique.ch>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Privacy analysis over a method cross-reference index: join the method
//! table against the sensitive-API table, walk reverse call edges up to a hop
//! limit and export the resulting permission-requiring code segments.

pub mod analysis;
