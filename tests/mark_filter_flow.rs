// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mkignore-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mkignore and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end checks of the list model across catalog parsing, filtering,
//! marking, and fixed-width rendering.

use mkignore::catalog::parse_name_list;
use mkignore::list::TemplateList;

#[test]
fn catalog_listing_flows_into_the_list_in_server_order() {
    let names = parse_name_list("rust,go\nmacos,go");
    let mut list = TemplateList::new();
    list.load(names);

    assert_eq!(list.len(), 4);
    assert_eq!(list.visible_name(0), Ok("rust"));
    assert_eq!(list.visible_name(1), Ok("go"));
    assert_eq!(list.visible_name(2), Ok("macos"));
    // The duplicate stays its own row.
    assert_eq!(list.visible_name(3), Ok("go"));
}

#[test]
fn marks_made_under_changing_filters_all_reach_the_save_set() {
    let mut list = TemplateList::new();
    list.load(parse_name_list("rust,go,macos,windows"));

    list.set_filter("rust");
    list.set_marked(0, true).unwrap();

    list.set_filter("w");
    list.set_marked(0, true).unwrap();

    list.set_filter("");
    assert_eq!(list.marked_names(), vec!["rust".to_owned(), "windows".to_owned()]);
}

#[test]
fn filter_round_trip_preserves_marks_and_visible_order() {
    let mut list = TemplateList::new();
    list.load(parse_name_list("rust,go,macos"));
    list.set_marked(1, true).unwrap();
    let marked_before = list.marked_names();

    list.set_filter("");
    list.set_filter("x");
    list.set_filter("");

    assert_eq!(list.marked_names(), marked_before);
    let names: Vec<&str> =
        (0..list.visible_count()).map(|index| list.visible_name(index).unwrap()).collect();
    assert_eq!(names, vec!["rust", "go", "macos"]);
}

#[test]
fn rendering_a_filtered_view_stays_grid_aligned() {
    let mut list = TemplateList::new();
    list.load(vec!["rust".to_owned(), "日本語テンプレート".to_owned(), "go".to_owned()]);

    let width = list.visible_width().unwrap();
    assert_eq!(width, 18);

    for index in 0..list.visible_count() {
        let cell = list.render(index, width).unwrap();
        assert_eq!(mkignore::render::display_width(&cell), width);
    }

    // Truncation below the widest name still fills the grid exactly.
    let cell = list.render(1, 7).unwrap();
    assert_eq!(mkignore::render::display_width(&cell), 7);
    assert_eq!(cell, "日本語 ");
}
