//! Локальный движок списков: фильтр → сортировка → страница.
//!
//! Every list screen fetches the full collection and shapes it here; the
//! backend offers no server-side filtering or paging.

use crate::domain::common::{CatalogEntity, EntityKind, RecordId, StatusFilter};
use std::cmp::Ordering;
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Размер страницы списков
pub const PAGE_SIZE: usize = 10;

/// Сколько номеров страниц показывать подряд
pub const PAGE_WINDOW: usize = 3;

/// Текстовое значение записи для поиска и сортировки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    Id,
    Name,
    /// Имя связанной записи, найденной по внешнему ключу
    Related(EntityKind),
}

impl TextKey {
    /// Unresolved references read as the empty string.
    pub fn resolve<'a, E: CatalogEntity>(&self, item: &'a E, names: &'a RelatedNames) -> &'a str {
        match self {
            TextKey::Id => item.id().as_str(),
            TextKey::Name => item.display_name(),
            TextKey::Related(kind) => item
                .reference(*kind)
                .and_then(|id| names.name_of(*kind, id))
                .unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: TextKey,
    pub direction: SortDirection,
}

/// Пункт меню "Ordenar"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
    pub key: &'static str,
    pub label: &'static str,
    pub spec: SortSpec,
}

impl SortOption {
    pub const fn asc(key: &'static str, label: &'static str, field: TextKey) -> Self {
        Self {
            key,
            label,
            spec: SortSpec {
                field,
                direction: SortDirection::Ascending,
            },
        }
    }

    pub const fn desc(key: &'static str, label: &'static str, field: TextKey) -> Self {
        Self {
            key,
            label,
            spec: SortSpec {
                field,
                direction: SortDirection::Descending,
            },
        }
    }
}

/// Имена связанных записей: тип → id → имя
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelatedNames {
    by_kind: HashMap<EntityKind, HashMap<RecordId, String>>,
}

impl RelatedNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: EntityKind, id: RecordId, name: impl Into<String>) {
        self.by_kind.entry(kind).or_default().insert(id, name.into());
    }

    pub fn name_of(&self, kind: EntityKind, id: &RecordId) -> Option<&str> {
        self.by_kind
            .get(&kind)
            .and_then(|names| names.get(id))
            .map(String::as_str)
    }
}

/// Параметры списка, которые задаёт пользователь
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub search: String,
    pub status: StatusFilter,
    pub sort: Option<SortSpec>,
    /// Номер страницы, с 1
    pub page: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            sort: None,
            page: 1,
        }
    }
}

/// Видимая страница списка
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }
}

impl ListQuery {
    pub fn apply<E: CatalogEntity>(&self, items: &[E], names: &RelatedNames) -> Page<E> {
        self.apply_with_size(items, names, PAGE_SIZE)
    }

    pub fn apply_with_size<E: CatalogEntity>(
        &self,
        items: &[E],
        names: &RelatedNames,
        page_size: usize,
    ) -> Page<E> {
        let mut visible = filter_items(items, &self.search, self.status, names);
        if let Some(spec) = self.sort {
            sort_items(&mut visible, spec, names);
        }
        let total_count = visible.len();
        let total = total_pages(total_count, page_size);
        let page_number = clamp_page(self.page, total);
        let items = paginate(&visible, page_number, page_size)
            .iter()
            .map(|item| (*item).clone())
            .collect();

        Page {
            items,
            page_number,
            total_pages: total,
            total_count,
        }
    }
}

/// Поиск без учёта регистра по ключам поиска записи И фильтр по статусу
pub fn filter_items<'a, E: CatalogEntity>(
    items: &'a [E],
    search: &str,
    status: StatusFilter,
    names: &RelatedNames,
) -> Vec<&'a E> {
    let needle = composed_lowercase(search);
    items
        .iter()
        .filter(|item| status.matches(item.status()))
        .filter(|item| {
            needle.is_empty()
                || E::search_keys()
                    .iter()
                    .any(|key| composed_lowercase(key.resolve(*item, names)).contains(&needle))
        })
        .collect()
}

/// Стабильная сортировка; при равных значениях решает id
pub fn sort_items<E: CatalogEntity>(items: &mut [&E], spec: SortSpec, names: &RelatedNames) {
    items.sort_by(|a, b| {
        let cmp = locale_compare(spec.field.resolve(*a, names), spec.field.resolve(*b, names))
            .then_with(|| a.id().cmp(b.id()));
        match spec.direction {
            SortDirection::Ascending => cmp,
            SortDirection::Descending => cmp.reverse(),
        }
    });
}

/// Сравнение строк "как у людей": регистр и диакритика вторичны
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(&fold(b))
        .then_with(|| composed_lowercase(a).cmp(&composed_lowercase(b)))
        .then_with(|| a.cmp(b))
}

/// Базовые буквы без диакритики, в нижнем регистре
fn fold(s: &str) -> String {
    let mut folded = String::with_capacity(s.len());
    for c in s.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase) {
        // stroke and ligature letters have no canonical decomposition
        match c {
            'ø' => folded.push('o'),
            'đ' | 'ð' => folded.push('d'),
            'ł' => folded.push('l'),
            'ħ' => folded.push('h'),
            'ı' => folded.push('i'),
            'æ' => folded.push_str("ae"),
            'œ' => folded.push_str("oe"),
            'ß' => folded.push_str("ss"),
            'þ' => folded.push_str("th"),
            other => folded.push(other),
        }
    }
    folded
}

fn composed_lowercase(s: &str) -> String {
    s.nfc().flat_map(char::to_lowercase).collect()
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Номер страницы в пределах `[1, max(total_pages, 1)]`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

pub fn paginate<T>(items: &[T], page_number: usize, page_size: usize) -> &[T] {
    let start = page_number.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// До трёх соседних номеров страниц вокруг текущей
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = clamp_page(current, total_pages);
    let span = PAGE_WINDOW.min(total_pages);
    let start = current
        .saturating_sub(1)
        .max(1)
        .min(total_pages + 1 - span);
    (start..start + span).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_artist::aggregate::Artist;
    use crate::domain::a002_album::aggregate::Album;
    use crate::domain::common::RecordStatus;

    fn artist(id: &str, name: &str, status: RecordStatus) -> Artist {
        Artist {
            id: RecordId::from(id),
            name: name.to_string(),
            status,
            modified_at: None,
        }
    }

    fn album(id: &str, name: &str, artist_id: &str) -> Album {
        Album {
            id: RecordId::from(id),
            name: name.to_string(),
            artist_id: RecordId::from(artist_id),
            status: RecordStatus::Active,
            modified_at: None,
        }
    }

    fn many_artists(count: usize) -> Vec<Artist> {
        (0..count)
            .map(|i| artist(&format!("AR{i:03}"), &format!("Artista {i:03}"), RecordStatus::Active))
            .collect()
    }

    #[test]
    fn filters_by_status_with_empty_search() {
        let items = vec![
            artist("1", "A", RecordStatus::Active),
            artist("2", "B", RecordStatus::Inactive),
        ];
        let names = RelatedNames::new();
        let result = filter_items(&items, "", StatusFilter::Only(RecordStatus::Active), &names);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "A");
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let items = vec![
            artist("1", "Michael Jackson", RecordStatus::Active),
            artist("2", "Madonna", RecordStatus::Inactive),
            artist("3", "Prince", RecordStatus::Active),
        ];
        let names = RelatedNames::new();
        let hits = filter_items(&items, "JACK", StatusFilter::All, &names);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "1");

        let none = filter_items(&items, "madonna", StatusFilter::Only(RecordStatus::Active), &names);
        assert!(none.is_empty());
    }

    #[test]
    fn ascending_then_descending_is_reversed() {
        let items = vec![
            artist("1", "Zoé", RecordStatus::Active),
            artist("2", "álvaro", RecordStatus::Active),
            artist("3", "Beto", RecordStatus::Active),
            artist("4", "beto", RecordStatus::Active),
            artist("5", "Ana", RecordStatus::Active),
        ];
        let names = RelatedNames::new();
        let mut asc: Vec<&Artist> = items.iter().collect();
        let mut desc = asc.clone();
        sort_items(
            &mut asc,
            SortSpec { field: TextKey::Name, direction: SortDirection::Ascending },
            &names,
        );
        sort_items(
            &mut desc,
            SortSpec { field: TextKey::Name, direction: SortDirection::Descending },
            &names,
        );
        let asc_ids: Vec<_> = asc.iter().map(|a| a.id.as_str()).collect();
        let mut desc_ids: Vec<_> = desc.iter().map(|a| a.id.as_str()).collect();
        desc_ids.reverse();
        assert_eq!(asc_ids, desc_ids);
        // accents and case do not push names to the end
        assert_eq!(asc_ids[0], "2");
        assert_eq!(asc_ids[1], "5");
    }

    #[test]
    fn no_sort_keeps_filtered_order() {
        let items = vec![
            artist("1", "C", RecordStatus::Active),
            artist("2", "A", RecordStatus::Active),
            artist("3", "B", RecordStatus::Active),
        ];
        let page = ListQuery::default().apply(&items, &RelatedNames::new());
        let ids: Vec<_> = page.items.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn sorts_by_related_name_with_unresolved_first() {
        let albums = vec![
            album("A1", "Thriller", "AR2"),
            album("A2", "Like a Virgin", "AR1"),
            album("A3", "Unknown", "AR9"),
        ];
        let mut names = RelatedNames::new();
        names.insert(EntityKind::Artist, RecordId::from("AR1"), "Madonna");
        names.insert(EntityKind::Artist, RecordId::from("AR2"), "Michael Jackson");

        let query = ListQuery {
            sort: Some(SortSpec {
                field: TextKey::Related(EntityKind::Artist),
                direction: SortDirection::Ascending,
            }),
            ..ListQuery::default()
        };
        let page = query.apply(&albums, &names);
        let ids: Vec<_> = page.items.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["A3", "A2", "A1"]);
    }

    #[test]
    fn accents_and_strokes_sort_with_their_base_letter() {
        assert_eq!(locale_compare("Øystein", "Zoé"), Ordering::Less);
        assert_eq!(locale_compare("Ñandú", "Nube"), Ordering::Less);
        assert_eq!(locale_compare("Ærosmith", "Bjork"), Ordering::Less);
        assert_eq!(locale_compare("José", "Josef"), Ordering::Less);
    }

    #[test]
    fn decomposed_and_composed_spellings_agree() {
        let decomposed = "Cafe\u{301}s";
        let composed = "Cafés";
        assert_eq!(fold(decomposed), fold(composed));
        assert_eq!(composed_lowercase(decomposed), composed_lowercase(composed));
        assert_eq!(locale_compare("Jose\u{301}", "Josef"), locale_compare("José", "Josef"));
        assert_eq!(locale_compare(decomposed, "Cafetera"), Ordering::Less);
        assert_eq!(locale_compare(composed, "Cafetera"), Ordering::Less);

        let artists = vec![artist("AR1", "Jose\u{301} Feliciano", RecordStatus::Active)];
        let found = filter_items(&artists, "josé", StatusFilter::All, &RelatedNames::new());
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn total_pages_boundaries() {
        assert_eq!(total_pages(0, PAGE_SIZE), 0);
        assert_eq!(total_pages(10, PAGE_SIZE), 1);
        assert_eq!(total_pages(11, PAGE_SIZE), 2);
    }

    #[test]
    fn pages_concatenate_to_the_full_list() {
        let items = many_artists(23);
        let names = RelatedNames::new();
        let first = ListQuery::default().apply(&items, &names);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_count, 23);

        let mut collected = Vec::new();
        for page in 1..=first.total_pages {
            let query = ListQuery { page, ..ListQuery::default() };
            collected.extend(query.apply(&items, &names).items);
        }
        assert_eq!(collected, items);
    }

    #[test]
    fn page_number_is_clamped() {
        let items = many_artists(11);
        let names = RelatedNames::new();
        let beyond = ListQuery { page: 9, ..ListQuery::default() }.apply(&items, &names);
        assert_eq!(beyond.page_number, 2);
        assert_eq!(beyond.items.len(), 1);
        assert!(beyond.has_prev());
        assert!(!beyond.has_next());

        let empty = ListQuery { page: 3, ..ListQuery::default() }.apply(&Vec::<Artist>::new(), &names);
        assert_eq!(empty.page_number, 1);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_prev() && !empty.has_next());
    }

    #[test]
    fn page_window_stays_in_range() {
        assert_eq!(page_window(1, 0), Vec::<usize>::new());
        assert_eq!(page_window(1, 1), vec![1]);
        assert_eq!(page_window(1, 5), vec![1, 2, 3]);
        assert_eq!(page_window(3, 5), vec![2, 3, 4]);
        assert_eq!(page_window(5, 5), vec![3, 4, 5]);
        assert_eq!(page_window(2, 2), vec![1, 2]);
    }
}
