// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// The curriculum position encoded in a category path. Paths start with a
/// slash followed by a root segment, so the interesting parts sit at
/// positions 2, 3 and 4 of the split.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassifiedPath {
    pub group: String,
    pub subproject: String,
    pub subsegment: String,
}

/// Classifies a category path. Missing positions are empty strings.
pub fn classify(path: &str) -> ClassifiedPath {
    let lower = path.to_lowercase();
    let parts: Vec<&str> = lower.split('/').collect();
    let at = |i: usize| parts.get(i).copied().unwrap_or_default().to_string();
    ClassifiedPath {
        group: at(2),
        subproject: at(3),
        subsegment: at(4),
    }
}

/// The last non-empty segment of a path, or the empty string if there is
/// none. Trailing slashes are ignored.
pub fn terminal_segment(path: &str) -> &str {
    path.split('/')
        .rev()
        .find(|segment| !segment.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let c = classify("/bahrain/bh-module/piscine-js/exercise-1");
        assert_eq!(c.group, "bh-module");
        assert_eq!(c.subproject, "piscine-js");
        assert_eq!(c.subsegment, "exercise-1");
    }

    #[test]
    fn test_classify_lowercases() {
        let c = classify("/Bahrain/BH-Piscine/Go-Reloaded");
        assert_eq!(c.group, "bh-piscine");
        assert_eq!(c.subproject, "go-reloaded");
        assert_eq!(c.subsegment, "");
    }

    #[test]
    fn test_classify_short_paths() {
        assert_eq!(classify(""), ClassifiedPath::default());
        assert_eq!(classify("/"), ClassifiedPath::default());
        assert_eq!(classify("/bahrain").group, "");
    }

    #[test]
    fn test_classify_is_positional_projection() {
        let paths = [
            "/bahrain/bh-module/piscine-js/exercise-1",
            "/bahrain/bh-module/ascii-art",
            "/bahrain/bh-piscine/quest-01/hello/extra",
            "/x/Y/Z",
        ];
        for path in paths {
            let c = classify(path);
            let lower = path.to_lowercase();
            let expected: Vec<&str> = lower.split('/').skip(2).take(3).collect();
            let joined = [c.group, c.subproject, c.subsegment]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("/");
            assert_eq!(joined, expected.join("/"));
        }
    }

    #[test]
    fn test_terminal_segment() {
        assert_eq!(terminal_segment("/bahrain/bh-module/ex1"), "ex1");
        assert_eq!(terminal_segment("/bahrain/bh-module/ex1/"), "ex1");
        assert_eq!(terminal_segment("ex1"), "ex1");
        assert_eq!(terminal_segment("///"), "");
        assert_eq!(terminal_segment(""), "");
    }
}
