use std::fmt::Write;

use crate::classifier::type_classifier::TypeCategory;
use crate::error::{Error, Result};
use crate::generator::{GenerateOptions, GeneratedFile, TableNames};
use crate::parser::model::{FieldDefinition, TableSchema};
use crate::parser::names::{capitalize, snake_to_camel};

const EDIT_SCSS: &str = "\
mat-form-field {
  display: block;
}
mat-card-footer {
  justify-content: flex-end;
}
";

const LIST_SCSS: &str = "\
table {
  width: 100%;
}

.mat-row .mat-cell {
  border-bottom: 1px solid transparent;
  border-top: 1px solid transparent;
}

.mat-row:hover .mat-cell {
  border-color: currentColor;
}

.column-dt {
  cursor: pointer;
}

.column-actions {
  width: 120px;
}

.spinner-container {
  height: 360px;
  width: 390px;
  position: fixed;
}

.spinner-container mat-spinner {
  margin: 130px auto 0 auto;
}

.header-item {
  margin-left: 5px;
  margin-right: 5px;
}
";

/// Fields the list component needs beyond the table names.
struct ListColumns<'a> {
    key: &'a FieldDefinition,
    search: &'a FieldDefinition,
}

/// Generate the Angular feature module for `schema`.
///
/// The first field is the row key; the second (or the first, for single-column tables)
/// drives the list search box.
pub fn generate_web(schema: &TableSchema, options: &GenerateOptions) -> Result<Vec<GeneratedFile>> {
    let fields = schema.fields();
    let key = fields.first().ok_or_else(|| Error::NoKeyColumn {
        table: schema.table_name().to_string(),
    })?;
    let columns = ListColumns {
        key,
        search: fields.get(1).unwrap_or(key),
    };

    let names = TableNames::new(schema.table_name());
    let dash = &names.dash;

    Ok(vec![
        GeneratedFile::new(format!("www/{dash}.module.ts"), module(&names)),
        GeneratedFile::new(format!("www/{dash}-routing.module.ts"), routing(&names)),
        GeneratedFile::new(format!("www/{dash}.service.ts"), service(&names)),
        GeneratedFile::new(format!("www/{dash}.datasource.ts"), datasource(&names)),
        GeneratedFile::new(
            format!("www/{dash}-edit/{dash}-edit.component.ts"),
            edit_ts(schema, &names),
        ),
        GeneratedFile::new(
            format!("www/{dash}-edit/{dash}-edit.component.html"),
            edit_html(schema, options),
        ),
        GeneratedFile::new(format!("www/{dash}-edit/{dash}-edit.component.scss"), EDIT_SCSS),
        GeneratedFile::new(
            format!("www/{dash}-list/{dash}-list.component.ts"),
            list_ts(schema, &names, &columns),
        ),
        GeneratedFile::new(
            format!("www/{dash}-list/{dash}-list.component.html"),
            list_html(schema, &columns),
        ),
        GeneratedFile::new(format!("www/{dash}-list/{dash}-list.component.scss"), LIST_SCSS),
    ])
}

/// Initial value of a reactive form control for `field`.
pub(crate) fn form_control_default(field: &FieldDefinition) -> &'static str {
    match field.category() {
        TypeCategory::Numeric => "0",
        TypeCategory::Boolean => "true",
        _ => "''",
    }
}

/// Material form field markup for `field`.
pub(crate) fn form_field(field: &FieldDefinition, date_placeholder: &str) -> String {
    let name = field.name();
    let description = field.description();
    match field.category() {
        TypeCategory::Boolean => format!(
            "      <mat-form-field class=\"full-width-input\">
        <mat-slide-toggle formControlName=\"{name}\">{description}</mat-slide-toggle>
        <textarea matInput hidden></textarea>
        <mat-error></mat-error>
      </mat-form-field>
"
        ),
        TypeCategory::Temporal => {
            let picker = format!("picker{}", snake_to_camel(name, true));
            format!(
                "      <mat-form-field class=\"full-width-input\">
        <mat-label>{description}</mat-label>
        <input matInput formControlName=\"{name}\" [matDatepicker]=\"{picker}\" placeholder=\"{date_placeholder}\"/>
        <mat-datepicker-toggle matSuffix [for]=\"{picker}\"></mat-datepicker-toggle>
        <mat-datepicker #{picker}></mat-datepicker>
        <mat-error></mat-error>
      </mat-form-field>
"
            )
        }
        _ => format!(
            "      <mat-form-field class=\"full-width-input\">
        <mat-label>{description}</mat-label>
        <input matInput formControlName=\"{name}\" />
        <mat-error></mat-error>
      </mat-form-field>
"
        ),
    }
}

fn module(names: &TableNames) -> String {
    let TableNames { pascal, dash, .. } = names;
    format!(
        "import {{ NgModule }} from '@angular/core';
import {{ CommonModule }} from '@angular/common';
import {{ ReactiveFormsModule }} from '@angular/forms';
import {{ {pascal}ListComponent }} from './{dash}-list/{dash}-list.component';
import {{ {pascal}EditComponent }} from './{dash}-edit/{dash}-edit.component';
import {{ MaterialModule }} from '../shared/material.module';
import {{ {pascal}Service }} from './{dash}.service';
import {{ {pascal}RoutingModule }} from './{dash}-routing.module';

@NgModule({{
  declarations: [
    {pascal}ListComponent,
    {pascal}EditComponent,
  ],
  imports: [
    CommonModule,
    ReactiveFormsModule,
    MaterialModule,
    {pascal}RoutingModule,
  ],
  providers: [
    {pascal}Service,
  ],
}})
export class {pascal}Module {{}}
"
    )
}

fn routing(names: &TableNames) -> String {
    let TableNames { pascal, dash, .. } = names;
    format!(
        "import {{ NgModule }} from '@angular/core';
import {{ RouterModule, Routes }} from '@angular/router';
import {{ {pascal}ListComponent }} from './{dash}-list/{dash}-list.component';
import {{ {pascal}EditComponent }} from './{dash}-edit/{dash}-edit.component';

const routes: Routes = [
  {{
    path: '',
    redirectTo: 'list',
    pathMatch: 'full',
  }},
  {{
    path: 'list',
    component: {pascal}ListComponent,
  }},
  {{
    path: 'edit/:id',
    component: {pascal}EditComponent,
  }},
];

@NgModule({{
  declarations: [],
  imports: [
    RouterModule.forChild(routes),
  ],
}})
export class {pascal}RoutingModule {{}}
"
    )
}

fn service(names: &TableNames) -> String {
    let TableNames { pascal, camel, .. } = names;
    format!(
        "import {{ Injectable }} from '@angular/core';
import {{ HttpClient }} from '@angular/common/http';
import {{ Observable }} from 'rxjs';
import {{
  Configuration,
  ListFilterRequestDto,
  {pascal}Dto,
  {pascal}ListResponseDto,
  {pascal}Service as Api{pascal}Service,
}} from '../api';
import {{ environment }} from '../../environments/environment';

@Injectable({{
  providedIn: 'root',
}})
export class {pascal}Service {{
  constructor(
    private httpClient: HttpClient,
    private api{pascal}Service: Api{pascal}Service,
  ) {{
    const basePath = environment.apiUrl;
    const conf = new Configuration();
    this.api{pascal}Service = new Api{pascal}Service(this.httpClient, basePath, conf);
  }}

  public savedFilter: ListFilterRequestDto = {{
    filter: [],
    sort: [],
    page_size: 25,
    sort_direction: 'asc',
    page_index: 0,
  }};

  public getFilterValue(fieldName: string): string {{
    return this.savedFilter.filter?.find((item) => item.field === fieldName)?.value ?? '';
  }}

  public list(body: ListFilterRequestDto): Observable<{pascal}ListResponseDto> {{
    return this.api{pascal}Service.{camel}ControllerList(body);
  }}

  public delete(id: number) {{
    return this.api{pascal}Service.{camel}ControllerDelete(id);
  }}

  public save(body: {pascal}Dto) {{
    return this.api{pascal}Service.{camel}ControllerSave(body);
  }}

  public view(id: number): Observable<{pascal}Dto> {{
    return this.api{pascal}Service.{camel}ControllerGet(id);
  }}
}}
"
    )
}

fn datasource(names: &TableNames) -> String {
    let TableNames {
        pascal,
        camel,
        dash,
        ..
    } = names;
    format!(
        "import {{ CollectionViewer, DataSource }} from '@angular/cdk/collections';
import {{ BehaviorSubject, Observable, of }} from 'rxjs';
import {{ catchError, finalize }} from 'rxjs/operators';
import {{ AlertService }} from '../shared/alert/alert.service';
import {{ {pascal}Dto, ListFilterRequestDto }} from '../api';
import {{ {pascal}Service }} from './{dash}.service';

export class {pascal}Datasource extends DataSource<{pascal}Dto> {{
  private {camel}Subject = new BehaviorSubject<{pascal}Dto[]>([]);

  private loadingSubject = new BehaviorSubject<boolean>(false);

  public loading$ = this.loadingSubject.asObservable();

  public cntSubject = new BehaviorSubject<number>(0);

  constructor(
    private {camel}Service: {pascal}Service,
    private alertService: AlertService,
  ) {{
    super();
  }}

  load(filter?: ListFilterRequestDto) {{
    this.loadingSubject.next(true);
    if (filter) {{
      this.{camel}Service.savedFilter = filter;
    }}
    this.{camel}Service.list(this.{camel}Service.savedFilter)
      .pipe(
        catchError((err) => {{
          this.alertService.clear();
          this.alertService.error(err.error.message);
          return of([]);
        }}),
        finalize(() => this.loadingSubject.next(false)),
      )
      .subscribe({{
        next: (items) => {{
          if ('data' in items) {{
            this.cntSubject.next(items.cnt);
            this.{camel}Subject.next(items.data);
          }}
        }},
      }});
  }}

  connect(collectionViewer: CollectionViewer): Observable<{pascal}Dto[]> {{
    return this.{camel}Subject.asObservable();
  }}

  disconnect(collectionViewer: CollectionViewer): void {{
    this.{camel}Subject.complete();
    this.loadingSubject.complete();
    this.cntSubject.complete();
  }}
}}
"
    )
}

fn edit_ts(schema: &TableSchema, names: &TableNames) -> String {
    let TableNames {
        pascal,
        camel,
        dash,
        ..
    } = names;

    let mut controls = String::new();
    for field in schema.fields() {
        let validators = if field.not_null() {
            ", Validators.required"
        } else {
            ""
        };
        writeln!(
            controls,
            "      {}: [{}{validators}],",
            field.name(),
            form_control_default(field)
        )
        .unwrap();
    }

    format!(
        "import {{ Component, OnDestroy }} from '@angular/core';
import {{ ActivatedRoute, Router }} from '@angular/router';
import {{ filter, takeUntil }} from 'rxjs/operators';
import {{ Subject }} from 'rxjs';
import {{ FormBuilder, FormGroup, Validators }} from '@angular/forms';
import {{ AlertService }} from '../../shared/alert/alert.service';
import {{ {pascal}Dto }} from '../../api';
import {{ {pascal}Service }} from '../{dash}.service';

@Component({{
  selector: 'app-{dash}-edit',
  templateUrl: './{dash}-edit.component.html',
  styleUrls: ['./{dash}-edit.component.scss'],
}})
export class {pascal}EditComponent implements OnDestroy {{
  form: FormGroup;

  private destroy$ = new Subject<void>();

  item: {pascal}Dto | undefined;

  constructor(
    private {camel}Service: {pascal}Service,
    private route: ActivatedRoute,
    private router: Router,
    private fb: FormBuilder,
    private alert: AlertService,
  ) {{
    this.form = this.fb.group({{
{controls}    }});
    this.route.params
      .pipe(
        takeUntil(this.destroy$),
        filter((params) => params.id),
      )
      .subscribe((params) => {{
        if (params.id.toString() === '0') {{ return; }}
        this.{camel}Service.view(params.id).subscribe({{
          next: (item) => {{
            this.item = item;
            this.form.patchValue(item);
          }},
        }});
      }});
  }}

  ngOnDestroy(): void {{
    this.destroy$.next();
    this.destroy$.unsubscribe();
  }}

  save() {{
    if (this.form.invalid) {{
      Object.keys(this.form.controls).forEach((field) => {{
        const control = this.form.get(field);
        control?.markAsTouched({{ onlySelf: true }});
      }});
      this.alert.error('There is error on form.');
      return;
    }}

    this.{camel}Service.save(this.form.value)
      .pipe(takeUntil(this.destroy$))
      .subscribe({{
        next: () => {{
          this.router.navigate(['/{dash}/list']).then();
        }},
        error: (error) => {{
          this.alert.error(error.error.message);
        }},
      }});
  }}

  close() {{
    this.router.navigate(['/{dash}/list']).then();
  }}
}}
"
    )
}

fn edit_html(schema: &TableSchema, options: &GenerateOptions) -> String {
    let mut out = String::from(
        "<mat-card>
  <mat-card-header>
    <h2 *ngIf=\"item\">Edit</h2>
    <h2 *ngIf=\"!item\">Add</h2>
  </mat-card-header>
  <mat-card-content>
    <form [formGroup]=\"form\">
",
    );
    for field in schema.fields() {
        out.push_str(&form_field(field, &options.date_placeholder));
    }
    out.push_str(
        "    </form>
  </mat-card-content>
  <mat-card-footer>
    <button mat-button (click)=\"close()\"><mat-icon>close</mat-icon>Close</button>
    <button mat-button (click)=\"save()\"><mat-icon>save</mat-icon>Save</button>
  </mat-card-footer>
</mat-card>
",
    );
    out
}

fn list_ts(schema: &TableSchema, names: &TableNames, columns: &ListColumns<'_>) -> String {
    let TableNames {
        pascal,
        camel,
        dash,
        ..
    } = names;
    let displayed = schema
        .fields()
        .iter()
        .map(|f| format!("'{}'", f.name()))
        .chain(std::iter::once("'actions'".to_string()))
        .collect::<Vec<_>>()
        .join(", ");
    let search = columns.search.name();
    let search_control = format!("in{}", capitalize(search));
    let key = columns.key.name();

    format!(
        "import {{
  AfterViewInit, Component, OnInit, ViewChild, OnDestroy,
}} from '@angular/core';
import {{ MatSort, SortDirection }} from '@angular/material/sort';
import {{ MatPaginator }} from '@angular/material/paginator';
import {{ Router }} from '@angular/router';
import {{ MatDialog }} from '@angular/material/dialog';
import {{ merge, Subject, Observable }} from 'rxjs';
import {{ debounceTime, distinctUntilChanged, tap, takeUntil }} from 'rxjs/operators';
import {{ FormBuilder, FormGroup }} from '@angular/forms';
import {{ DeleteDialogComponent }} from '../../shared/delete-dialog/delete-dialog.component';
import {{ AlertService }} from '../../shared/alert/alert.service';
import {{ {pascal}Service }} from '../{dash}.service';
import {{ {pascal}Dto, FilterItemDto }} from '../../api';
import {{ {pascal}Datasource }} from '../{dash}.datasource';

@Component({{
  selector: 'app-{dash}-list',
  templateUrl: './{dash}-list.component.html',
  styleUrls: ['./{dash}-list.component.scss'],
}})
export class {pascal}ListComponent implements OnInit, AfterViewInit, OnDestroy {{
  private destroy$ = new Subject<void>();

  displayedColumns = [{displayed}];

  public listTable!: {pascal}Datasource;

  @ViewChild(MatSort, {{ static: false }}) sort!: MatSort;

  @ViewChild(MatPaginator) paginator!: MatPaginator;

  searchForm: FormGroup;

  private filterFields: Record<string, string> = {{ {search_control}: '{search}' }};

  dataSize: number = 0;

  pageSizeOpt: number[] = [25, 50, 100];

  public filter: {{
    pageSize: number;
    pageIndex: number;
    sortActive: string;
    sortDirection: SortDirection;
  }} = {{
      pageSize: 25,
      pageIndex: 0,
      sortActive: '',
      sortDirection: 'asc',
    }};

  constructor(
    private {camel}Service: {pascal}Service,
    private router: Router,
    public dialog: MatDialog,
    private alertService: AlertService,
    private fb: FormBuilder,
  ) {{
    this.searchForm = this.fb.group({{
      {search_control}: [this.{camel}Service.getFilterValue('{search}')],
    }});
  }}

  ngOnInit(): void {{
    this.listTable = new {pascal}Datasource(this.{camel}Service, this.alertService);
    this.listTable.cntSubject
      .pipe(takeUntil(this.destroy$))
      .subscribe({{
        next: (cnt) => {{
          this.dataSize = cnt;
          this.pageSizeOpt = [25, 50, cnt];
        }},
      }});

    const saved = this.{camel}Service.savedFilter;
    if (saved) {{
      this.filter.pageIndex = saved.page_index;
      this.filter.pageSize = saved.page_size;
      this.filter.sortDirection = saved.sort_direction as SortDirection;
      if (saved.sort?.length) {{
        this.filter.sortActive = saved.sort[0];
      }}
    }}
    this.listTable.load();
  }}

  ngOnDestroy(): void {{
    this.destroy$.next();
    this.destroy$.unsubscribe();
  }}

  ngAfterViewInit(): void {{
    this.sort.sortChange
      .pipe(takeUntil(this.destroy$))
      .subscribe({{
        next: (sort) => {{
          this.filter.sortDirection = sort.direction;
          this.filter.sortActive = sort.active;
          this.paginator.pageIndex = 0;
        }},
      }});

    const searchEvents: Observable<unknown>[] = Object.values(this.searchForm.controls)
      .map((control) => control.valueChanges);
    merge(...searchEvents).pipe(
      takeUntil(this.destroy$),
      debounceTime(150),
      distinctUntilChanged(),
      tap(() => {{
        this.paginator.pageIndex = 0;
        this.load();
      }}),
    ).subscribe();

    merge(
      this.sort.sortChange,
      this.paginator.page,
    ).pipe(
      takeUntil(this.destroy$),
      tap(() => this.load()),
    ).subscribe();
  }}

  load() {{
    if (!this.sort) {{
      return;
    }}

    const filter: FilterItemDto[] = [];
    Object.keys(this.searchForm.controls).forEach((key) => {{
      const value = this.searchForm.get(key)?.value;
      if (value && value !== '') {{
        filter.push({{
          field: this.filterFields[key] ?? key,
          value,
        }});
      }}
    }});
    const sort = [];
    if (this.filter.sortActive) {{
      sort.push(this.filter.sortActive);
    }}

    this.listTable?.load({{
      filter,
      sort,
      page_index: this.paginator?.pageIndex,
      page_size: this.paginator?.pageSize,
      sort_direction: this.filter.sortDirection,
    }});
  }}

  edit(id: number) {{
    this.router.navigate([`/{dash}/edit/${{id}}`]).then();
  }}

  deleteDlg(row: {pascal}Dto) {{
    const dlg = this.dialog.open(DeleteDialogComponent, {{ data: {{ title: `${{row.{search}}}` }} }});
    dlg.afterClosed().pipe(takeUntil(this.destroy$)).subscribe((result) => {{
      if (!result) {{ return; }}
      this.{camel}Service.delete(Number(row.{key})).subscribe({{
        next: () => {{
          this.alertService.success('Item deleted');
          this.load();
        }},
        error: (error) => {{
          this.alertService.error(error.error.message);
        }},
      }});
    }});
  }}
}}
"
    )
}

fn list_html(schema: &TableSchema, columns: &ListColumns<'_>) -> String {
    let search = columns.search.name();
    let search_control = format!("in{}", capitalize(search));
    let key = columns.key.name();

    let mut out = format!(
        "<mat-card class=\"mat-elevation-z4\">
  <mat-card-content>
    <form [formGroup]=\"searchForm\">
      <div class=\"flex-container\">
        <div>
          List
        </div>
        <div>
          <button mat-raised-button (click)=\"edit(0)\" class=\"header-item\">
            <mat-icon>add</mat-icon>
            Add
          </button>
          <mat-form-field class=\"header-item\">
            <mat-label>Search {}</mat-label>
            <input matInput placeholder=\"Search field\" formControlName=\"{search_control}\">
          </mat-form-field>
        </div>
      </div>
    </form>
  </mat-card-content>
</mat-card>
<br/>
<mat-card class=\"mat-elevation-z4\">
  <mat-card-content>
    <div class=\"spinner-container\" *ngIf=\"listTable.loading$ | async\">
      <mat-spinner></mat-spinner>
    </div>

    <table mat-table matSort [dataSource]=\"listTable\">

",
        columns.search.description()
    );

    for field in schema.fields() {
        let name = field.name();
        let description = field.description();
        write!(
            out,
            "      <ng-container matColumnDef=\"{name}\">
        <th mat-header-cell mat-sort-header *matHeaderCellDef>
          {description}
        </th>
        <td
          (click)=\"edit(item.{key})\"
          mat-cell
          *matCellDef=\"let item\" class=\"column-dt\">
          {{{{item.{name}}}}}
        </td>
      </ng-container>

"
        )
        .unwrap();
    }

    write!(
        out,
        "      <ng-container matColumnDef=\"actions\" stickyEnd>
        <th mat-header-cell *matHeaderCellDef></th>
        <td mat-cell *matCellDef=\"let item\" class=\"column-actions\">
          <button mat-icon-button (click)=\"edit(item.{key})\"><mat-icon>edit</mat-icon></button>
          <button mat-icon-button (click)=\"deleteDlg(item)\"><mat-icon>delete</mat-icon></button>
        </td>
      </ng-container>
      <tr mat-header-row *matHeaderRowDef=\"displayedColumns\"></tr>
      <tr
        mat-row
        *matRowDef=\"let row; columns: displayedColumns;\"
        class=\"table-row\"></tr>
    </table>
    <mat-paginator
      [pageSizeOptions]=\"pageSizeOpt\"
      [pageSize]=\"filter.pageSize\"
      [pageIndex]=\"filter.pageIndex\"
      [length]=\"dataSize\"
      showFirstLastButtons
      aria-label=\"Choose page\">
    </mat-paginator>
  </mat-card-content>
</mat-card>
"
    )
    .unwrap();
    out
}
