//! Go source fixtures
//!
//! `example.com/shop` has an entry package under `cmd/server`, a layered
//! `internal/handler` package and a plain `internal/lookup` package.

use tempfile::TempDir;

use super::builders::ModuleBuilder;

pub const SHOP_MODULE: &str = "example.com/shop";

pub const LOOKUP_GO: &str = r#"package lookup

import "time"

type Request struct {
	ID string
}

type Response struct {
	Name    string
	Created time.Time
	Tags    []string
}

type Service interface {
	Lookup(*Request) (*Response, error)
}
"#;

pub const LOOKUP_TEST_GO: &str = r#"package lookup

type Fixture struct {
	Path string
}
"#;

pub const HANDLER_GO: &str = r#"package handler

import (
	"context"
	"fmt"
)

type Handler interface {
	Get(ctx context.Context, id string) (string, error)
	Notify(ids ...string)
}

type handler struct {
	prefix string
}

func NewHandler(prefix string) (Handler, error) {
	if prefix == "" {
		return nil, fmt.Errorf("empty prefix")
	}
	return &handler{prefix: prefix}, nil
}

func (h *handler) Get(ctx context.Context, id string) (string, error) {
	return h.prefix + id, nil
}

func (h *handler) Notify(ids ...string) {}
"#;

pub const HANDLER_DOC_GO: &str = "// Package handler serves users.\npackage handler\n";

pub const MAIN_GO: &str = r#"package main

import (
	"context"
	"fmt"

	"example.com/shop/internal/handler"
)

func main() {
	h, err := handler.NewHandler("user-")
	if err != nil {
		panic(err)
	}
	fmt.Println(h.Get(context.Background(), "1"))
}
"#;

pub const MAIN_TEST_GO: &str = r#"package main

import (
	"testing"

	"example.com/shop/internal/handler"
)

func TestHandler(t *testing.T) {
	if _, err := handler.NewHandler(""); err == nil {
		t.Fatal("expected error")
	}
}
"#;

/// The full shop module
pub fn shop_module() -> TempDir {
    ModuleBuilder::new(SHOP_MODULE)
        .file("cmd/server/main.go", MAIN_GO)
        .file("internal/handler/handler.go", HANDLER_GO)
        .file("internal/handler/doc.go", HANDLER_DOC_GO)
        .file("internal/lookup/lookup.go", LOOKUP_GO)
        .file("internal/lookup/lookup_test.go", LOOKUP_TEST_GO)
        .build()
}
